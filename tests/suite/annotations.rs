//! The typed helpers exercised together through the crate root.

use std::collections::HashMap;

use lull_types::{
    Number, add, concat, element_length, make_multiplier, safely_get_value, sum_list,
    sum_mixed_list, to_str,
};

#[test]
fn helpers_compose() {
    let total = sum_list(&[1.25, 2.5]);
    let doubled = make_multiplier(2.0)(total);
    assert_eq!(doubled, 7.5);
    assert_eq!(to_str(add(doubled, 0.5)), "8.0");
    assert_eq!(concat("total=", &to_str(total)), "total=3.75");
}

#[test]
fn mixed_list_matches_float_list() {
    let mixed = [Number::Int(1), Number::Float(2.5), Number::Int(3)];
    assert_eq!(sum_mixed_list(&mixed), sum_list(&[1.0, 2.5, 3.0]));
}

#[test]
fn element_length_over_owned_strings() {
    let words = vec!["alpha".to_string(), "be".to_string()];
    let pairs = element_length(words.iter());
    assert_eq!(pairs, vec![(&words[0], 5), (&words[1], 2)]);
}

#[test]
fn safely_get_value_with_string_keys() {
    let mut scores: HashMap<String, u32> = HashMap::new();
    scores.insert("ada".to_string(), 3);
    let zero = 0;

    assert_eq!(safely_get_value(&scores, &"ada".to_string(), Some(&zero)), Some(&3));
    assert_eq!(safely_get_value(&scores, &"bob".to_string(), Some(&zero)), Some(&0));
    assert_eq!(safely_get_value(&scores, &"bob".to_string(), None), None);
}
