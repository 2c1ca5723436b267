use squarefit_canonical::{
    canonicalizer::Canonicalizer, compute_fingerprint, Digest, DigestAlg, InstanceId, ProfileId,
    Quantity,
};
use serde_json::json;

#[test]
fn digest_serializes_to_golden_json() {
    let digest = Digest {
        alg: DigestAlg::Sha256,
        b64: "Zm9vYmFy".into(),
    };

    assert_eq!(
        serde_json::to_string(&digest).unwrap(),
        r#"{"alg":"sha-256","b64":"Zm9vYmFy"}"#
    );
}

#[test]
fn quantity_dec_serialization_is_deterministic() {
    let quantity = Quantity::Dec {
        m: "141421".into(),
        s: 5,
    };

    assert_eq!(
        serde_json::to_string(&quantity).unwrap(),
        r#"{"t":"dec","m":"141421","s":5}"#
    );
}

#[test]
fn instance_id_is_transparent() {
    let id = InstanceId::parse("fit:square_packing_rotatable").unwrap();
    assert_eq!(
        serde_json::to_string(&id).unwrap(),
        r#""fit:square_packing_rotatable""#
    );
}

#[test]
fn canonicalizer_produces_ordered_bytes() {
    let profile = ProfileId::parse("profileid000000001").unwrap();
    let canonicalizer = Canonicalizer::new(profile);
    let value = json!({"b": 1, "a": {"nested": 2}});
    let bytes = canonicalizer.canonicalize(&value).unwrap();
    assert_eq!(bytes, br#"{"a":{"nested":2},"b":1}"#.to_vec());
}

#[test]
fn fingerprint_is_stable_sha256() {
    let canonicalizer = Canonicalizer::new(ProfileId::parse("profileid000000001").unwrap());
    let value = json!({"squares": [["1", "2", "3", "4"]]});
    let first = compute_fingerprint(&value, "squarefit:packing:v1", &canonicalizer).unwrap();
    let second = compute_fingerprint(&value, "squarefit:packing:v1", &canonicalizer).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.alg, DigestAlg::Sha256);
    assert_eq!(hex::encode(first.to_bytes().unwrap()).len(), 64);
}

#[test]
fn packing_fingerprint_matches_golden_bytes() {
    let canonicalizer = Canonicalizer::new(ProfileId::parse("squarefit-canonical-v1").unwrap());
    let payload = json!({
        "squares": [
            [28_000_000_000i64, 28_000_000_000i64, 707_106_781, -707_106_781],
            [88_000_000_000i64, 28_000_000_000i64, 707_106_781, -707_106_781]
        ],
        "quant_scale": 1_000_000_000u64,
        "domain": "square_packing_rotatable"
    });
    let stringified = json!({
        "squares": [
            ["28000000000", "28000000000", "707106781", "-707106781"],
            ["88000000000", "28000000000", "707106781", "-707106781"]
        ],
        "quant_scale": "1000000000",
        "domain": "square_packing_rotatable"
    });
    let bytes = canonicalizer.canonicalize(&stringified).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        concat!(
            r#"{"domain":"square_packing_rotatable","quant_scale":"1000000000","#,
            r#""squares":[["28000000000","28000000000","707106781","-707106781"],"#,
            r#"["88000000000","28000000000","707106781","-707106781"]]}"#
        )
    );

    let digest = compute_fingerprint(
        &payload,
        "squarefit:square_packing_rotatable:v1",
        &canonicalizer,
    )
    .unwrap();
    assert_eq!(
        hex::encode(digest.to_bytes().unwrap()),
        "7d827c92d74f706e2a480c302305a064b305001afee6ab523ec3b6f9963a9322"
    );
}
