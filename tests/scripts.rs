use std::fs;

use rpn::Engine;
use walkdir::WalkDir;

/// Expectations declared in the `#` header of a script.
#[derive(Default)]
struct Header {
    expect:   Option<String>,
    failures: usize,
}

fn parse_header(content: &str) -> Header {
    let mut header = Header::default();

    for line in content.lines().filter_map(|line| line.trim().strip_prefix('#')) {
        if let Some(value) = line.trim().strip_prefix("expect:") {
            header.expect = Some(value.trim().to_string());
        } else if let Some(value) = line.trim().strip_prefix("failures:") {
            header.failures = value.trim().parse().expect("invalid failure count");
        }
    }

    header
}

#[test]
fn script_corpus() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "rpn"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let header = parse_header(&content);

        let body = content.lines()
                          .filter(|line| !line.trim_start().starts_with('#'))
                          .collect::<Vec<_>>()
                          .join("\n");
        let mut engine = Engine::new();
        let failures = engine.evaluate_lines(&body).len();

        count += 1;
        assert_eq!(failures, header.failures, "failing lines in {path:?}");
        let expected = header.expect
                             .unwrap_or_else(|| panic!("{path:?} declares no '# expect:' line"));
        assert_eq!(engine.result().map(ToString::to_string),
                   Some(expected),
                   "top of stack in {path:?}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}
