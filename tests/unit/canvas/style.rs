use super::*;

#[test]
fn starts_with_opaque_black() {
    let stack = StyleStack::new();
    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.top().fill_color, Rgba8::new(0, 0, 0, 255));
}

#[test]
fn save_copies_and_restore_pops() {
    let mut stack = StyleStack::new();
    stack.top_mut().fill_color = Rgba8::new(1, 2, 3, 255);
    stack.save();
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.top().fill_color, Rgba8::new(1, 2, 3, 255));

    stack.top_mut().fill_color = Rgba8::new(9, 9, 9, 9);
    stack.restore();
    assert_eq!(stack.top().fill_color, Rgba8::new(1, 2, 3, 255));
}

#[test]
fn restore_never_empties() {
    let mut stack = StyleStack::new();
    stack.restore();
    stack.restore();
    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.top().fill_color, Rgba8::BLACK);
}
