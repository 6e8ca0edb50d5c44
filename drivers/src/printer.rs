/*++

Licensed under the Apache-2.0 license.

File Name:

    printer.rs

Abstract:

    File contains support routines and macros to print diagnostics

--*/
use core::convert::Infallible;
use ufmt::{uDisplay, uWrite};

#[derive(Default)]
pub struct Printer;

impl uWrite for Printer {
    type Error = Infallible;

    /// Writes a string slice into this writer, returning whether the write succeeded.
    #[cfg(not(feature = "std"))]
    #[inline(never)]
    fn write_str(&mut self, _str: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Writes a string slice into this writer, returning whether the write succeeded.
    #[cfg(feature = "std")]
    fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
        print!("{str}");
        Ok(())
    }
}

#[macro_export]
macro_rules! cprint {
    ($($tt:tt)*) => {{
        let _ = ufmt::uwrite!(&mut $crate::printer::Printer::default(), $($tt)*);
    }}
}

#[macro_export]
macro_rules! cprintln {
    ($($tt:tt)*) => {{
        let _ = ufmt::uwriteln!(&mut $crate::printer::Printer::default(), $($tt)*);
    }}
}

/// Diagnostic output, compiled in only with the `verbose` feature
#[cfg(feature = "verbose")]
#[macro_export]
macro_rules! cverbose {
    ($($tt:tt)*) => {{
        $crate::cprint!("VERBOSE: ");
        $crate::cprintln!($($tt)*);
    }}
}

/// Diagnostic output, compiled in only with the `verbose` feature
#[cfg(not(feature = "verbose"))]
#[macro_export]
macro_rules! cverbose {
    ($($tt:tt)*) => {{
        if false {
            $crate::cprintln!($($tt)*);
        }
    }};
}

#[macro_export]
macro_rules! cwarn {
    ($($tt:tt)*) => {{
        $crate::cprint!("WARNING: ");
        $crate::cprintln!($($tt)*);
    }}
}

#[macro_export]
macro_rules! cerror {
    ($($tt:tt)*) => {{
        $crate::cprint!("ERROR: ");
        $crate::cprintln!($($tt)*);
    }}
}

pub struct HexBytes<'a>(pub &'a [u8]);
impl uDisplay for HexBytes<'_> {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        for &x in self.0.iter() {
            let c = x >> 4;
            if c < 10 {
                f.write_char((c + b'0') as char)?;
            } else {
                f.write_char((c - 10 + b'A') as char)?;
            }
            let c = x & 0xf;
            if c < 10 {
                f.write_char((c + b'0') as char)?;
            } else {
                f.write_char((c - 10 + b'A') as char)?;
            }
        }
        Ok(())
    }
}

/// Displays a 32-bit code as `0x` followed by eight hex digits
pub struct HexU32(pub u32);
impl uDisplay for HexU32 {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str("0x")?;
        HexBytes(&self.0.to_be_bytes()).fmt(f)
    }
}
