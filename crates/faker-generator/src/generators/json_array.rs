//! JSON-array text generator.

use fake::faker::lorem::en::Word;
use fake::Fake;
use faker_core::introspect::DEFAULT_SPAN;
use faker_core::{FieldValue, JsonArraySchema, JsonElementType};
use json_types::encode_json_array;
use rand::Rng;

/// Generate one element of the given JSON type.
pub fn generate_element<R: Rng>(rng: &mut R, element: JsonElementType) -> FieldValue {
    match element {
        JsonElementType::String => FieldValue::String(Word().fake_with_rng(rng)),
        JsonElementType::Integer => FieldValue::Int(rng.gen_range(0..=DEFAULT_SPAN)),
        JsonElementType::Number => FieldValue::Float(rng.gen_range(0.0..1000.0)),
        JsonElementType::Boolean => FieldValue::Bool(rng.gen_bool(0.5)),
    }
}

/// Generate the text of a JSON array with one element per schema entry.
pub fn generate_json_array<R: Rng>(
    rng: &mut R,
    schema: &JsonArraySchema,
) -> Result<FieldValue, serde_json::Error> {
    let items: Vec<FieldValue> = schema
        .elements()
        .iter()
        .map(|element| generate_element(rng, *element))
        .collect();

    Ok(FieldValue::String(encode_json_array(&items)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_types::decode_json_array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_json_array_matches_schema() {
        let mut rng = StdRng::seed_from_u64(42);
        let schema = JsonArraySchema::new(vec![JsonElementType::String, JsonElementType::Integer]);

        for _ in 0..50 {
            let value = generate_json_array(&mut rng, &schema).unwrap();
            let decoded = decode_json_array(value.as_str().unwrap(), &schema).unwrap();
            assert_eq!(decoded.len(), 2);
            assert!(decoded[0].as_str().is_some());
            assert!(decoded[1].as_i64().is_some());
        }
    }

    #[test]
    fn test_generate_empty_json_array() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_json_array(&mut rng, &JsonArraySchema::new(vec![])).unwrap();
        assert_eq!(value.as_str(), Some("[]"));
    }

    #[test]
    fn test_number_element_is_float() {
        let mut rng = StdRng::seed_from_u64(1);
        let value = generate_element(&mut rng, JsonElementType::Number);
        assert!(matches!(value, FieldValue::Float(_)));
    }
}
