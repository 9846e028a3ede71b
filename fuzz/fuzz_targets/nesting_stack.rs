#![no_main]

use dom_nesting::{
    NestingStack, NestingStackConfig, Tag, VOID_ELEMENTS, is_valid_child, validate_dom_nesting,
};
use libfuzzer_sys::fuzz_target;

const EXTRA_NAMES: &[&str] = &["my-widget", "FORM", "", "x-li"];

fn name_for(byte: u8) -> &'static str {
    let index = (byte & 0x7f) as usize;
    match Tag::ALL.get(index) {
        Some(tag) => tag.as_str(),
        None => EXTRA_NAMES[index % EXTRA_NAMES.len()],
    }
}

// Each byte is one event: high bit clear opens/inserts a tag, set closes one.
fuzz_target!(|data: &[u8]| {
    let mut stack = NestingStack::new(NestingStackConfig {
        report_violations: false,
    });
    for &byte in data.iter().take(4096) {
        let name = name_for(byte);
        let info = stack.ancestor_info().clone();

        assert!(validate_dom_nesting(name, None, &info));
        for void in VOID_ELEMENTS {
            assert!(!is_valid_child(void.as_str(), name, &info));
        }

        if byte & 0x80 == 0 {
            let expected = stack.check(name);
            let depth = stack.depth();
            assert_eq!(stack.open(name), expected);
            assert!(stack.depth() <= depth + 1);
        } else {
            let depth = stack.depth();
            match stack.close(name) {
                Ok(closed) => {
                    assert_eq!(closed.as_str(), name);
                    assert!(stack.depth() < depth);
                }
                Err(_) => {
                    assert_eq!(stack.depth(), depth);
                    assert_eq!(stack.ancestor_info(), &info);
                }
            }
        }
    }
    let stats = stack.stats();
    assert!(stats.rejected <= stats.checked);
    stack.clear();
    assert_eq!(stack.depth(), 0);
});
