//! Fuzz the msocheck front end
//!
//! This target runs lexing, parsing and semantic analysis on arbitrary
//! input. None of them may panic; malformed input must come back as an error.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(formula) = msocheck::parse(input) {
            let analysis = msocheck::analyze(&formula);
            let _ = msocheck::diagnostic::render(input, &analysis.diagnostics(), false);
        }
    }
});
