/// Progress reporting for the pagination loop.
/// Frontends implement this to surface status to users.
pub trait Progress: Send {
    /// Called after each non-empty page with the unique count so far.
    fn page_done(&mut self, _page: u32, _unique: usize) {}

    /// Called once collection stops, successful or not.
    fn finish(&mut self, _total: usize) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints one line per page to stdout.
pub struct ConsoleProgress;

impl ConsoleProgress {
    pub fn page_line(page: u32, unique: usize) -> String {
        format!("Processed page {page}, found {unique} unique categories so far")
    }

    pub fn finish_line(total: usize) -> String {
        format!("\nFound {total} unique categories")
    }
}

impl Progress for ConsoleProgress {
    fn page_done(&mut self, page: u32, unique: usize) {
        println!("{}", Self::page_line(page, unique));
    }

    fn finish(&mut self, total: usize) {
        println!("{}", Self::finish_line(total));
    }
}
