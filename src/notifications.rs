/// Side-channel for user-facing, non-blocking messages. Generation
/// failures surface here exactly once; they never unwind through the
/// session machine.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Prints notifications to stderr so they stay apart from the host's
/// prompts on stdout.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn info(&self, message: &str) {
        eprintln!("* {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("! {}", message);
    }
}
