use mira_utils::hash::djb2;

#[test]
fn test_djb2() {
    assert_eq!(djb2(""), 5381);
    assert_eq!(djb2("a"), 177670);
    assert_eq!(djb2("ab"), 5863208);
}

#[test]
fn test_djb2_is_order_sensitive() {
    assert_ne!(djb2("ab"), djb2("ba"));
}
