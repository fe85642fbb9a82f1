use std::fmt::Debug;

use crate::request::NormalizedRequest;

/// Assert that `parser` succeeds on `input` and yields `expect`.
pub fn generic_command_parse<F, I, T, E>(parser: F, input: I, expect: T)
where
    F: Fn(I) -> Result<T, E>,
    T: PartialEq + Debug,
    E: Debug,
{
    let res = match parser(input) {
        Ok(res) => res,
        Err(e) => panic!("The parser failed:\r\n{:#?}", e),
    };
    assert_eq!(
        expect, res,
        "The expect:\r\n({:?}) should be same with the result:\r\n({:?})",
        expect, res
    );
}

/// Assert that `parser` returns exactly `expect`, failures included.
pub fn generic_parse<F, I, T>(parser: F, input: I, expect: T)
where
    F: Fn(I) -> T,
    T: PartialEq + Debug,
    I: Debug + Clone,
{
    let result = parser(input.clone());
    assert_eq!(
        expect, result,
        "The input:\r\n({:?})\r\nThe expect:\r\n({:?}) should be same with the result:\r\n({:?})",
        input, expect, result
    );
}

/// Assert the headers of `request`, in insertion order.
pub fn assert_headers(request: &NormalizedRequest, expect: &[(&str, &str)]) {
    let headers: Vec<_> = request
        .headers
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(expect, headers.as_slice(), "headers of {:?}", request.url);
}
