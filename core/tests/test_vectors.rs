//! Verify URL construction against the JSON vectors in `test-vectors/`.
//!
//! Each case lists the client operations in caller order plus the URL the
//! final state must serialize to (`null` for "no query configured"). The
//! vectors double as a readable catalogue of the scoping and
//! option-filtering rules.

use producthunt_core::{Identifier, OptionValue, ProductHuntClient};

fn client() -> ProductHuntClient {
    ProductHuntClient::with_base_url("12345", "http://localhost:3000").unwrap()
}

fn apply_op(client: &mut ProductHuntClient, op: &[serde_json::Value]) {
    let name = op[0].as_str().unwrap();
    match name {
        "reset" => client.reset(),
        "type" => {
            client.set_type(op[1].as_str().unwrap());
        }
        "subtype" => client.set_subtype(op[1].as_str().unwrap()),
        "identifier" => match &op[1] {
            v if v.as_str() == Some("all") => client.set_identifier(Identifier::All),
            v => client.set_identifier(v.as_u64().unwrap()),
        },
        "user" => client.set_user(op[1].as_u64().unwrap()),
        "post" => client.set_post(op[1].as_u64().unwrap()),
        "option" => {
            let key = op[1].as_str().unwrap();
            let value = match &op[2] {
                serde_json::Value::String(s) => OptionValue::Text(s.clone()),
                serde_json::Value::Number(n) => OptionValue::Number(n.as_i64().unwrap()),
                serde_json::Value::Bool(b) => OptionValue::Flag(*b),
                other => panic!("unsupported option value: {other}"),
            };
            client.set_option(key, value);
        }
        other => panic!("unknown op: {other}"),
    }
}

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let mut c = client();
        for op in case["ops"].as_array().unwrap() {
            apply_op(&mut c, op.as_array().unwrap());
        }

        let expected = case["expected_url"].as_str();
        assert_eq!(c.build_url().as_deref(), expected, "{name}");
    }
}
