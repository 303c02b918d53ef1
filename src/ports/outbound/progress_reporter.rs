/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts user-facing progress messages (e.g., to stderr)
/// so they never mix with the command's result on stdout.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports a condition the user should know about that does not stop the command
    fn report_warning(&self, message: &str);

    /// Reports an error message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
