//! User-facing output for load and save progress.

/// Where the dump manager reports progress and per-row failures.
pub trait Console {
    /// Prints an informational line.
    fn println(&self, text: &str);

    /// Prints an error line.
    fn print_error(&self, text: &str);
}

/// Console writing to stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    #[allow(clippy::print_stdout)]
    fn println(&self, text: &str) {
        println!("{text}");
    }

    #[allow(clippy::print_stderr)]
    fn print_error(&self, text: &str) {
        eprintln!("{text}");
    }
}

impl<C: Console + ?Sized> Console for &C {
    fn println(&self, text: &str) {
        (**self).println(text);
    }

    fn print_error(&self, text: &str) {
        (**self).print_error(text);
    }
}
