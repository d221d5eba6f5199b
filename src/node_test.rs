use super::*;

#[test]
fn test_sentinel() {
    let node: Node<u32> = Node::sentinel();
    assert!(node.is_black());
    assert!(node.element.is_none());
    assert_eq!((node.left, node.right, node.parent), (NIL, NIL, NIL));
}

#[test]
fn test_new_node() {
    let mut node = Node::new(42_u32, 7);
    assert!(node.is_red());
    assert_eq!(*node.as_element(), 42);
    assert_eq!(node.parent, 7);

    node.set_child(Side::Left, 3);
    node.set_child(Side::Right, 5);
    assert_eq!(node.child(Side::Left), 3);
    assert_eq!(node.child(Side::Right), 5);
    assert_eq!(node.child(Side::Left.opposite()), 5);

    node.set_black();
    assert!(node.is_black());
    node.set_red();
    assert!(node.is_red());
}

#[test]
#[should_panic]
fn test_sentinel_element() {
    let node: Node<u32> = Node::sentinel();
    node.as_element();
}
