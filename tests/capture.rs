use colour_filter::{print_current, strip, DisplayPrefs};

#[inline(never)]
fn nested(depth: u32, out: &mut Vec<u8>) -> usize {
    if depth == 0 {
        print_current(DisplayPrefs::new(), out).unwrap()
    } else {
        nested(depth - 1, out)
    }
}

#[test]
fn prints_own_stack() {
    let mut out = Vec::new();
    let frames = nested(3, &mut out);
    assert!(frames > 0);

    let text = strip(&String::from_utf8(out).unwrap());
    println!("{}", text);
    assert!(text.starts_with("#0 "));
    assert!(text.ends_with('\n'));
    assert!(text.lines().count() >= frames);
    for line in text.lines().filter(|l| l.starts_with('#')) {
        assert!(line.contains(" in "), "{:?} has no address", line);
    }
}
