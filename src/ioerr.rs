#[doc(hidden)]
#[macro_export]
macro_rules! ioerr {
    (@E $kind:expr, $arg:expr) => {
        ::std::io::Error::new($kind, $arg)
    };

    (InvalidInput $($tt:tt)*) => ( ioerr!(::std::io::ErrorKind::InvalidInput $($tt)*) );
    (InvalidData $($tt:tt)*) => ( ioerr!(::std::io::ErrorKind::InvalidData $($tt)*) );
    (WriteZero $($tt:tt)*) => ( ioerr!(::std::io::ErrorKind::WriteZero $($tt)*) );
    (UnexpectedEof $($tt:tt)*) => ( ioerr!(::std::io::ErrorKind::UnexpectedEof $($tt)*) );
    (Other $($tt:tt)*) => ( ioerr!(::std::io::ErrorKind::Other $($tt)*) );

    ($kind:path, $fmt:expr, $($tt:tt)+) => (
        ioerr!(@E $kind, format!($fmt, $($tt)+))
    );
    ($kind:path, $arg:expr) => (
        ioerr!(@E $kind, $arg)
    );
    ($kind:path) => (
        ::std::io::Error::from($kind)
    );
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    #[test]
    fn kinds_and_messages() {
        let e = ioerr!(InvalidInput, "bits_per_sample ({}) must be 8 or 16", 12);
        assert_eq!(e.kind(), ErrorKind::InvalidInput);
        assert_eq!(e.to_string(), "bits_per_sample (12) must be 8 or 16");

        let e = ioerr!(UnexpectedEof);
        assert_eq!(e.kind(), ErrorKind::UnexpectedEof);

        let e = ioerr!(InvalidData, "bad box");
        assert_eq!(e.to_string(), "bad box");
    }
}
