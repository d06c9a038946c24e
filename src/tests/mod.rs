//! Cross-cutting tests that exercise more than one module at once.

mod integration;
