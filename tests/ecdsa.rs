use cryptal_ecc::Error;
use cryptal_ecc::curves::{self, Curve};
use cryptal_ecc::keys::{PrivateKey, PublicKey};
use cryptal_ecc::mac::HmacSha256;
use cryptal_ecc::primitives::vli::{self, MAX_WORDS, Vli};
use cryptal_ecc::signatures::ecdsa::bits2int;
use cryptal_ecc::signatures::{Signature, sign, sign_deterministic, sign_prehashed, verify_prehashed};
use hex_literal::hex;

/// SHA-256("sample")
const HASH: [u8; 32] = hex!("AF2BDBE1AA9B6EC1E2ADE1D694F41FC71A831D0268E9891562113D8A62ADD1BF");

fn native(curve: &Curve, bytes: &[u8]) -> Vli {
    curve.bytes_to_native(bytes).unwrap()
}

#[test]
fn test_p256_known_nonce() {
    // RFC 6979, A.2.5 (P-256, SHA-256, "sample"), with s normalized low.
    let curve = curves::secp256r1();
    let private = PrivateKey::from_bytes(
        curve,
        &hex!("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721"),
    )
    .unwrap();

    let public = private.public_key();
    assert_eq!(
        public.to_bytes(),
        hex!(
            "60FED4BA255A9D31C961EB74C6356D68C049B8923B61FA6CE669622E60F29FB6"
            "7903FE1008B8BC99A41AE9E95628BC64F2F1B20C2D7E9F5177A3C294D4462299"
        )
    );

    let k = native(curve, &hex!("A6E3C57DD01ABE90086538398355DD4C3B17AA873382B0F24D6129493D8AAD60"));
    let signature = sign_prehashed(&private, &HASH, &k).unwrap();

    assert_eq!(
        signature.r,
        native(curve, &hex!("EFD48B2AACB6A8FD1140DD9CD45E81D69D2C877B56AAF991C34D0EA84EAF3716"))
    );
    assert_eq!(
        signature.s,
        native(curve, &hex!("0834E36AD29A83BF2BC9385E491D6099C8FDF9D1ED67AA7EA5F51F93782857A9"))
    );

    assert!(verify_prehashed(&public, &HASH, &signature));

    // The high-s form from the RFC verifies too.
    let high = Signature {
        r: signature.r,
        s: native(curve, &hex!("F7CB1C942D657C41D436C7A1B6E29F65F3E900DBB9AFF4064DC4AB2F843ACDA8")),
    };
    assert!(verify_prehashed(&public, &HASH, &high));
}

#[test]
fn test_secp256k1_deterministic_vector() {
    let curve = curves::secp256k1();
    let private = PrivateKey::from_bytes(
        curve,
        &hex!("AA5E28D6A97A2479A65527F7290311A3624D4CC0FA1578598EE3C2613BF99522"),
    )
    .unwrap();

    let signature = sign_deterministic::<HmacSha256>(&private, &HASH).unwrap();

    assert_eq!(
        signature.r,
        native(curve, &hex!("AC1919D00C52D24DE3EA60905B552E83AB95E093AD24EDD909DE2A2D65D6B0D7"))
    );
    assert_eq!(
        signature.s,
        native(curve, &hex!("3074A11EE929E4C3701A17BC49EFADEDF54BA471BA4CCA4C0442E359C1D38A6E"))
    );
    assert_eq!(sign_deterministic::<HmacSha256>(&private, &HASH).unwrap(), signature);
    assert!(verify_prehashed(&private.public_key(), &HASH, &signature));
}

#[test]
fn test_random_signatures_verify() {
    for curve in [curves::secp256k1(), curves::secp256r1(), curves::secp192r1()] {
        let private = PrivateKey::generate(curve).unwrap();
        let public = private.public_key();

        let first = sign(&private, &HASH).unwrap();
        let second = sign(&private, &HASH).unwrap();

        assert_ne!(first, second);
        assert!(verify_prehashed(&public, &HASH, &first));
        assert!(verify_prehashed(&public, &HASH, &second));

        // Low-s normalization.
        let s_high = vli::less_than(curve.half_n(), &first.s, curve.num_words());
        assert!(!bool::from(s_high));
    }
}

#[test]
fn test_verification_rejects_tampering() {
    let curve = curves::secp256k1();
    let private = PrivateKey::generate(curve).unwrap();
    let public = private.public_key();
    let signature = sign(&private, &HASH).unwrap();

    let mut hash = HASH;
    hash[0] ^= 1;
    assert!(!verify_prehashed(&public, &hash, &signature));

    let mut bad_r = signature;
    bad_r.r[0] ^= 1;
    assert!(!verify_prehashed(&public, &HASH, &bad_r));

    let zero_s = Signature {
        r: signature.r,
        s: [0; MAX_WORDS],
    };
    assert!(!verify_prehashed(&public, &HASH, &zero_s));

    let mut n: Vli = [0; MAX_WORDS];
    n.copy_from_slice(curve.n());
    let overflow_r = Signature { r: n, s: signature.s };
    assert!(!verify_prehashed(&public, &HASH, &overflow_r));

    let other = PrivateKey::generate(curve).unwrap().public_key();
    assert!(!verify_prehashed(&other, &HASH, &signature));
}

#[test]
fn test_invalid_nonce_is_rejected() {
    let curve = curves::secp256k1();
    let private = PrivateKey::generate(curve).unwrap();

    assert_eq!(
        sign_prehashed(&private, &HASH, &[0; MAX_WORDS]).unwrap_err(),
        Error::InvalidScalar
    );
}

#[test]
fn test_long_hash_is_truncated() {
    let curve = curves::secp192r1();
    let private = PrivateKey::generate(curve).unwrap();
    let public = PublicKey::from_bytes(curve, &private.public_key().to_bytes()).unwrap();

    let signature = sign_deterministic::<HmacSha256>(&private, &HASH).unwrap();
    assert!(verify_prehashed(&public, &HASH, &signature));

    // Only the leftmost 24 bytes count.
    let mut tail = HASH;
    tail[31] ^= 0xFF;
    assert!(verify_prehashed(&public, &tail, &signature));
}

#[test]
fn test_bits2int() {
    let curve = curves::secp192r1();

    assert_eq!(bits2int(curve, &HASH), native(curve, &HASH[..24]));

    // Short hashes are taken as is.
    assert_eq!(bits2int(curve, &[0x01, 0x02]), [0x0102, 0, 0, 0]);

    // Values >= n are reduced once.
    let curve = curves::secp256k1();
    let reduced = bits2int(curve, &[0xFF; 32]);
    let mut expected: Vli = [0; MAX_WORDS];
    vli::sub(&mut expected, &[u64::MAX; MAX_WORDS], curve.n(), 4);
    assert_eq!(reduced, expected);
}
