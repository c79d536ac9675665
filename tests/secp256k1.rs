use cryptal_ecc::curves::{
    self, AffinePoint, Curve, CurveOps, CurveParams, Secp256k1Ops, point_add, point_mul,
};
use cryptal_ecc::primitives::vli::{MAX_WORDS, Vli};
use hex_literal::hex;

const P: [u8; 32] = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");
const N: [u8; 32] = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");
const B: [u8; 32] = hex!("0000000000000000000000000000000000000000000000000000000000000007");
const GX: [u8; 32] = hex!("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
const GY: [u8; 32] = hex!("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8");

/// secp256k1 with the generic reduction: only the `a = 0` hooks are
/// specialized.
struct SlowSecp256k1;

impl CurveOps for SlowSecp256k1 {
    fn x_cubed_plus_b(&self, curve: &Curve, x: &Vli) -> Vli {
        Secp256k1Ops.x_cubed_plus_b(curve, x)
    }

    fn double_jacobian(&self, curve: &Curve, x: &mut Vli, y: &mut Vli, z: &mut Vli) {
        Secp256k1Ops.double_jacobian(curve, x, y, z)
    }
}

fn native(bytes: &[u8]) -> Vli {
    curves::secp256k1().bytes_to_native(bytes).unwrap()
}

fn encode(point: &AffinePoint) -> [u8; 64] {
    let curve = curves::secp256k1();
    let mut out = [0u8; 64];

    curve.native_to_bytes(&point.x, &mut out[..32]).unwrap();
    curve.native_to_bytes(&point.y, &mut out[32..]).unwrap();

    out
}

#[test]
fn test_public_key_vector() {
    let curve = curves::secp256k1();
    let k = native(&hex!("AA5E28D6A97A2479A65527F7290311A3624D4CC0FA1578598EE3C2613BF99522"));

    let public = point_mul(curve, curve.g(), &k);

    assert_eq!(
        encode(&public),
        hex!(
            "34F9460F0E4F08393D192B3C5133A6BA099AA0AD9FD54EBCCFACDFA239FF49C6"
            "0B71EA9BD730FD8923F6D25A7A91E7DD7728A960686CB5A901BB419E0F2CA232"
        )
    );
}

#[test]
fn test_small_multiples() {
    let curve = curves::secp256k1();
    let g = *curve.g();

    let two_g = hex!(
        "C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5"
        "1AE168FEA63DC339A3C58419466CEAEEF7F632653266D0E1236431A950CFE52A"
    );
    let three_g = hex!(
        "F9308A019258C31049344F85F89D5229B531C845836F99B08601F113BCE036F9"
        "388F7B0F632DE8140FE337E62A37F3566500A99934C2231B6CB9FD7584B8E672"
    );

    assert_eq!(encode(&point_mul(curve, &g, &[2, 0, 0, 0])), two_g);
    assert_eq!(encode(&point_mul(curve, &g, &[3, 0, 0, 0])), three_g);
    assert_eq!(encode(&point_add(curve, &g, &g)), two_g);
}

#[test]
fn test_n_minus_one_is_negated_generator() {
    let curve = curves::secp256k1();
    let k = native(&hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364140"));

    let result = point_mul(curve, curve.g(), &k);

    assert_eq!(result.x, curve.g().x);
    assert_eq!(
        result.y,
        native(&hex!("B7C52588D95C3B9AA25B0403F1EEF75702E84BB7597AABE663B82F6F04EF2777"))
    );
}

#[test]
fn test_fast_path_matches_generic_reduction() {
    let params = CurveParams {
        name: "secp256k1 (generic reduction)",
        p: &P,
        n: &N,
        b: &B,
        gx: &GX,
        gy: &GY,
    };
    let slow = Curve::new(&params, &SlowSecp256k1).unwrap();
    let fast = curves::secp256k1();

    let scalars: [Vli; 4] = [
        [1, 0, 0, 0],
        native(&hex!("AA5E28D6A97A2479A65527F7290311A3624D4CC0FA1578598EE3C2613BF99522")),
        native(&hex!("7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A1")),
        [u64::MAX; MAX_WORDS],
    ];

    for k in &scalars {
        assert_eq!(point_mul(&slow, slow.g(), k), point_mul(fast, fast.g(), k));
    }

    let x = native(&hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2E"));
    assert_eq!(slow.mod_square(&x), fast.mod_square(&x));
    assert_eq!(slow.mod_mult(&x, &fast.g().y), fast.mod_mult(&x, &fast.g().y));
}

#[test]
fn test_reduction_is_canonical() {
    let curve = curves::secp256k1();
    let p_minus_one = native(&hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2E"));

    // (-1)² = 1
    assert_eq!(curve.mod_square(&p_minus_one), [1, 0, 0, 0]);

    // (-1)(-1)(-1) = -1
    let cube = curve.mod_mult(&curve.mod_square(&p_minus_one), &p_minus_one);
    assert_eq!(cube, p_minus_one);
}
