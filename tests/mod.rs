mod data_source_mock;
mod ingest_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Basic functionality tests to ensure nothing is broken
// - lookup_tests: Student, faculty and unified-site queries over a fixture index
// - ingest_tests: Converting TSV exports and querying the result
// - data_source_mock: Loading through an in-memory dataset store
