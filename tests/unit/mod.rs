mod index_coverage_tests;
mod rating_coverage_tests;
mod run_coverage_tests;
