//! Sample Kindrid payloads shared by the unit tests.

/// Payload shape from Kindrid's published documentation.
pub const DOCUMENTED_SAMPLE: &str = r#"{
    "donation": {
        "status": "completed",
        "amount": 12.12,
        "date": "2013-10-14T08:42:27Z",
        "id": "xxxxSAMPLEIDxxxx",
        "designation": "missions",
        "to": "+17705551212",
        "donor": {
            "name": "Sample Name",
            "address": "123 Main St",
            "city": "Anytown",
            "state": "ST",
            "zipcode": "12345",
            "id": "xxxxSAMPLEIDxxxx",
            "email": "email@address.smp",
            "phone": "+16265551212",
            "zip": "12345",
            "tags": {
                "campus": "Campus Name",
                "chms_id": "1234"
            }
        }
    }
}"#;

/// Payload shape Kindrid actually delivers, exactly as it arrives on the wire.
pub const REAL_SAMPLE: &str = r#"{"donation":{"status":"completed","amount":12.12,"date":"2013-10-14T08:42:27Z","id":"xxxxSAMPLEIDxxxx","designation":"missions","to":"+17705551212","giving_type":"Text Giving","source_type":"Card","donor":{"name":"Sample Name","address":"123 Main St","city":"Anytown","state":"ST","zipcode":"12345","id":"xxxxSAMPLEIDxxxx","email":"email@address.smp","phone":"+16265551212","zip":"12345","tags":{"_campus":"58629938b5ef8a00019b721f"}}}}"#;

pub const ENDPOINT_URL: &str = "https://example.com/endpoint";

pub const API_SECRET: &str = "abc123";

/// HMAC-SHA1 of `ENDPOINT_URL + REAL_SAMPLE` keyed by `API_SECRET`.
pub const REAL_SAMPLE_SIGNATURE: &str = "a995889544b3886be5ffe721a3040c3f714bd62f";
