use ecommerce_common::util::{escape_search_keyword, keyword_matcher};

#[test]
fn search_keyword_literal_case_insensitive() {
    let m = keyword_matcher("red").unwrap();
    assert!(m.is_match("Red Shoe"));
    assert!(m.is_match("dark RED hat"));
    assert!(!m.is_match("Blue Shoe"));
    // meta-characters are matched literally
    let m = keyword_matcher("a.c").unwrap();
    assert!(m.is_match("xA.Cy"));
    assert!(!m.is_match("abc"));
    assert_eq!(escape_search_keyword("1+1"), "1\\+1");
}
