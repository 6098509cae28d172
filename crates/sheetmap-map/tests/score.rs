use proptest::prelude::*;
use sheetmap_map::similarity;

proptest! {
    #[test]
    fn reflexive(a in "[a-zA-Z0-9_ ]{0,24}") {
        prop_assert_eq!(similarity(&a, &a), 1.0);
    }

    #[test]
    fn symmetric(a in "[a-zA-Z0-9_ ]{0,24}", b in "[a-zA-Z0-9_ ]{0,24}") {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn bounded(a in "[a-zA-Z0-9_ ]{0,24}", b in "[a-zA-Z0-9_ ]{0,24}") {
        let score = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn case_does_not_matter(a in "[a-z_ ]{0,24}", b in "[a-z_ ]{0,24}") {
        prop_assert_eq!(similarity(&a.to_uppercase(), &b), similarity(&a, &b));
    }
}

#[test]
fn empty_strings_are_identical() {
    assert_eq!(similarity("", ""), 1.0);
}
