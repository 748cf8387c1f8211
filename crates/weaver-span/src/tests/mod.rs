//! Unit tests for `weaver_span`.

mod support;

mod convert_tests;
