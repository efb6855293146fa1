use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom};

use anyhow::{anyhow, Result};
use clap;
use structopt::StructOpt;

use qtsound::{IoReader, IoWriter, SampleEntry, SoundSampleEntry, ToBytes};

#[derive(StructOpt, Debug)]
#[structopt(setting = clap::AppSettings::VersionlessSubcommands)]
pub struct MainOpts {
    #[structopt(long)]
    /// Log options (like RUSTLOG; trace, debug, info etc)
    pub log: Option<String>,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(StructOpt, Debug)]
#[structopt(rename_all = "kebab-case")]
pub enum Command {
    #[structopt(display_order = 1)]
    /// Show a sound sample description.
    Dump(DumpOpts),

    #[structopt(display_order = 2)]
    /// Write a new sound sample description.
    Create(CreateOpts),
}

#[derive(StructOpt, Debug)]
pub struct DumpOpts {
    #[structopt(short, long, default_value = "0")]
    /// Byte offset of the entry in the file.
    pub offset: u64,

    #[structopt(short, long)]
    /// Output in JSON
    pub json: bool,

    /// Input filename.
    pub input: String,
}

#[derive(StructOpt, Debug)]
pub struct CreateOpts {
    #[structopt(short, long, default_value = "1")]
    /// Data reference index.
    pub data_ref: u16,

    #[structopt(short, long, default_value = "2")]
    /// Number of channels.
    pub channels: u16,

    #[structopt(short, long, default_value = "16")]
    /// Bits per sample (8 or 16).
    pub bits: u16,

    #[structopt(short, long, default_value = "44100")]
    /// Sample rate.
    pub rate: f64,

    /// Output filename.
    pub output: String,
}

fn main() -> Result<()> {
    let opts = MainOpts::from_args();

    let mut builder = env_logger::Builder::new();
    if let Some(ref log_opts) = opts.log {
        builder.parse_filters(log_opts);
    } else if let Ok(ref log_opts) = std::env::var("RUST_LOG") {
        builder.parse_filters(log_opts);
    } else {
        builder.parse_filters("info");
    }
    builder.init();

    match opts.cmd {
        Command::Dump(opts) => return dump(opts),
        Command::Create(opts) => return create(opts),
    }
}

fn dump(opts: DumpOpts) -> Result<()> {
    let mut file = File::open(&opts.input)?;
    file.seek(SeekFrom::Start(opts.offset))?;
    let mut reader = IoReader::new(BufReader::new(file));

    let parsed = SoundSampleEntry::read(&mut reader)
        .map_err(|e| anyhow!("{}: offset {}: {}", opts.input, opts.offset, e))?;
    for warning in &parsed.warnings {
        eprintln!("{}: warning: {}", opts.input, warning);
    }

    let entry = parsed.value;
    if opts.json {
        let json = serde_json::to_string_pretty(&entry)?;
        println!("{}", json);
    } else {
        println!("{}", entry);
    }

    Ok(())
}

fn create(opts: CreateOpts) -> Result<()> {
    let entry = SoundSampleEntry::new(opts.data_ref, opts.channels, opts.bits, opts.rate)?;
    log::debug!("create: {:?}", entry);

    let file = File::create(&opts.output)?;
    let mut writer = IoWriter::new(BufWriter::new(file));
    entry.to_bytes(&mut writer)?;
    writer.flush()?;

    log::info!("{}: wrote {} bytes ({})", opts.output, writer.pos(), entry.fourcc());
    Ok(())
}
