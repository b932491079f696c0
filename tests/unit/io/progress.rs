//! Tests for batch progress tracking

#[cfg(test)]
mod tests {
    use autostereo::io::progress::ProgressManager;
    use rayon::prelude::*;
    use std::path::Path;

    // Tests hidden progress still counts completed items
    // Verified by skipping the increment
    #[test]
    fn test_hidden_progress_counts() {
        let progress = ProgressManager::hidden(3);
        progress.start_item(Path::new("frames/0.png"));
        progress.complete_item();
        progress.complete_item();

        assert_eq!(progress.completed(), 2);
        progress.finish();
    }

    // Tests items can be completed from worker threads
    // Verified by counting on a thread-local copy
    #[test]
    fn test_parallel_completion() {
        let progress = ProgressManager::hidden(64);
        (0..64).into_par_iter().for_each(|_| progress.complete_item());

        assert_eq!(progress.completed(), 64);
    }
}
