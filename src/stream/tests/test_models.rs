#[cfg(test)]
mod models_tests {
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;

    use crate::error::plist::PlistError;
    use crate::stream::models::{unescape, Element, Tag, Value};

    fn element(tag: Tag, text: Option<&str>, children: Vec<Element>) -> Element {
        Element {
            tag,
            text: text.map(str::to_string),
            children,
        }
    }

    fn keep_raw(_: &[u8]) -> Option<Value> {
        None
    }

    fn convert(element: Element) -> Result<Option<Value>, PlistError> {
        element.into_value(keep_raw)
    }

    #[test]
    fn dict_pairs_alternating_children() {
        let dict = element(
            Tag::Dict,
            None,
            vec![
                element(Tag::Key, Some("a"), vec![]),
                element(Tag::String, Some("x"), vec![]),
                element(Tag::Key, Some("b"), vec![]),
                element(Tag::Integer, Some("2"), vec![]),
            ],
        );

        let expected = IndexMap::from([
            ("a".to_string(), Value::String("x".to_string())),
            ("b".to_string(), Value::Integer(2)),
        ]);
        assert_eq!(convert(dict).unwrap(), Some(Value::Dictionary(expected)));
    }

    #[test]
    fn dict_duplicate_key_keeps_first_position_with_last_value() {
        // "a" repeats after "b"; the rewrite must not move it to the end
        let dict = element(
            Tag::Dict,
            None,
            vec![
                element(Tag::Key, Some("a"), vec![]),
                element(Tag::Integer, Some("1"), vec![]),
                element(Tag::Key, Some("b"), vec![]),
                element(Tag::Integer, Some("2"), vec![]),
                element(Tag::Key, Some("a"), vec![]),
                element(Tag::Integer, Some("3"), vec![]),
            ],
        );

        let Some(Value::Dictionary(map)) = convert(dict).unwrap() else {
            panic!("expected a dictionary");
        };
        let entries: Vec<(&String, &Value)> = map.iter().collect();
        assert_eq!(
            entries,
            vec![
                (&"a".to_string(), &Value::Integer(3)),
                (&"b".to_string(), &Value::Integer(2)),
            ]
        );
    }

    #[test]
    fn dict_with_odd_children_is_malformed() {
        let dict = element(
            Tag::Dict,
            None,
            vec![element(Tag::Key, Some("orphan"), vec![])],
        );
        assert_eq!(convert(dict), Err(PlistError::MalformedDict(1)));
    }

    #[test]
    fn empty_dict_converts_to_empty_map() {
        assert_eq!(
            convert(element(Tag::Dict, None, vec![])).unwrap(),
            Some(Value::Dictionary(IndexMap::new()))
        );
    }

    #[test]
    fn array_preserves_order() {
        let array = element(
            Tag::Array,
            None,
            vec![
                element(Tag::Integer, Some("1"), vec![]),
                element(Tag::Integer, Some("2"), vec![]),
                element(Tag::Integer, Some("3"), vec![]),
            ],
        );
        assert_eq!(
            convert(array).unwrap(),
            Some(Value::Array(vec![
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3),
            ]))
        );
    }

    #[test]
    fn plist_wrapper_yields_its_child() {
        let root = element(
            Tag::Plist,
            None,
            vec![element(Tag::String, Some("x"), vec![])],
        );
        assert_eq!(
            convert(root).unwrap(),
            Some(Value::String("x".to_string()))
        );
    }

    #[test]
    fn empty_plist_wrapper_yields_nothing() {
        assert_eq!(convert(element(Tag::Plist, None, vec![])).unwrap(), None);
    }

    #[test]
    fn childless_string_converts_to_empty_string() {
        assert_eq!(
            convert(element(Tag::String, None, vec![])).unwrap(),
            Some(Value::String(String::new()))
        );
    }

    #[test]
    fn integer_text_is_trimmed_and_parsed() {
        assert_eq!(
            convert(element(Tag::Integer, Some("\n  -42  "), vec![])).unwrap(),
            Some(Value::Integer(-42))
        );
    }

    #[test]
    fn unparsable_integer_is_unsupported() {
        assert_eq!(
            convert(element(Tag::Integer, Some("twelve"), vec![])),
            Err(PlistError::UnsupportedScalar(
                "integer",
                "twelve".to_string()
            ))
        );
    }

    #[test]
    fn real_text_parses_as_float() {
        assert_eq!(
            convert(element(Tag::Real, Some("3.25"), vec![])).unwrap(),
            Some(Value::Real(3.25))
        );
    }

    #[test]
    fn boolean_literals_ignore_text() {
        assert_eq!(
            convert(element(Tag::True, Some("nope"), vec![])).unwrap(),
            Some(Value::Boolean(true))
        );
        assert_eq!(
            convert(element(Tag::False, None, vec![])).unwrap(),
            Some(Value::Boolean(false))
        );
    }

    #[test]
    fn date_text_parses_as_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 5, 12, 30, 0).unwrap();
        assert_eq!(
            convert(element(Tag::Date, Some("2024-01-05T12:30:00Z"), vec![])).unwrap(),
            Some(Value::Date(expected))
        );
    }

    #[test]
    fn unparsable_date_has_no_fallback() {
        assert_eq!(
            convert(element(Tag::Date, Some("last thursday"), vec![])),
            Err(PlistError::UnsupportedScalar(
                "date",
                "last thursday".to_string()
            ))
        );
    }

    #[test]
    fn data_text_decodes_from_base64() {
        let data = element(Tag::Data, Some("\n  aGVs\n  bG8=\n  "), vec![]);
        assert_eq!(
            convert(data).unwrap(),
            Some(Value::Data(b"hello".to_vec()))
        );
    }

    #[test]
    fn invalid_base64_is_unsupported() {
        assert_eq!(
            convert(element(Tag::Data, Some("@@@"), vec![])),
            Err(PlistError::UnsupportedScalar("data", "@@@".to_string()))
        );
    }

    #[test]
    fn declined_payload_keeps_raw_bytes() {
        // keep_raw declines everything; the decoded bytes survive as-is
        let data = element(Tag::Data, Some("AQID"), vec![]);
        let Some(value) = convert(data).unwrap() else {
            panic!("expected a value");
        };
        assert_eq!(value, Value::Data(vec![1, 2, 3]));

        let mut reader = value.as_reader().unwrap();
        let mut bytes = vec![];
        std::io::Read::read_to_end(&mut reader, &mut bytes).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn accepted_payload_replaces_raw_bytes() {
        fn utf8_payload(bytes: &[u8]) -> Option<Value> {
            Some(Value::String(std::str::from_utf8(bytes).ok()?.to_string()))
        }

        let data = element(Tag::Data, Some("aGVsbG8="), vec![]);
        assert_eq!(
            data.into_value(utf8_payload).unwrap(),
            Some(Value::String("hello".to_string()))
        );
    }

    #[test]
    fn can_unescape_predefined_entities() {
        assert_eq!(
            unescape("&lt;a&gt; &amp; &quot;b&quot; &apos;c&apos;"),
            "<a> & \"b\" 'c'"
        );
    }

    #[test]
    fn can_unescape_numeric_references() {
        assert_eq!(unescape("&#65;&#x42;"), "AB");
    }

    #[test]
    fn unrecognized_references_are_left_verbatim() {
        assert_eq!(unescape("&nbsp; & b &amp; c"), "&nbsp; & b & c");
    }
}
