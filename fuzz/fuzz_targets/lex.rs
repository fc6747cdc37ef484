#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text must either scan and parse or produce a diagnostic
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = jack_syntax::lexer::lex(s) {
            assert!(tokens.iter().all(|t| t.span.end <= s.len()));
        }
        if let Err(e) = jack_syntax::parse_str(s) {
            let _ = e.report();
        }
    }
});
