//! Test infrastructure shared by service and repository tests.
