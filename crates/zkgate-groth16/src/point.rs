//! snarkjs JSON coordinates to BN254 points.
//!
//! snarkjs writes G1 points as `[x, y, z]` and G2 points as
//! `[[x.c0, x.c1], [y.c0, y.c1], [z.c0, z.c1]]`, all decimal. Points are
//! affine (`z = 1`) except the point at infinity (`z = 0`).

use ark_bn254::{Fq, Fq2, G1Affine, G2Affine};
use ark_ff::{BigInteger, PrimeField};
use zkgate_core::decode_bytes;

/// Parse a canonical decimal field element. Values at or above the modulus
/// are rejected rather than reduced.
pub fn parse_field<F: PrimeField>(value: &str) -> Result<F, String> {
    let bytes = decode_bytes(value).map_err(|e| e.to_string())?;
    let modulus = F::MODULUS.to_bytes_be();
    if !below(&bytes, &modulus) {
        return Err(format!("{value} is not below the field modulus"));
    }
    Ok(F::from_be_bytes_mod_order(&bytes))
}

/// `value` is a minimal big-endian magnitude.
fn below(value: &[u8], modulus: &[u8]) -> bool {
    let start = modulus.iter().position(|&b| b != 0).unwrap_or(modulus.len());
    let modulus = &modulus[start..];
    value.len() < modulus.len() || (value.len() == modulus.len() && value < modulus)
}

fn is_zero(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b == b'0')
}

fn is_one(value: &str) -> bool {
    value.trim_start_matches('0') == "1"
}

pub fn parse_g1(coords: &[String]) -> Result<G1Affine, String> {
    let [x, y, z] = coords else {
        return Err(format!("G1 point needs 3 coordinates, got {}", coords.len()));
    };
    if is_zero(z) {
        return Ok(G1Affine::identity());
    }
    if !is_one(z) {
        return Err(format!("G1 point is not affine: z = {z}"));
    }

    let point = G1Affine::new_unchecked(parse_field::<Fq>(x)?, parse_field::<Fq>(y)?);
    if !point.is_on_curve() {
        return Err("G1 point is not on the curve".into());
    }
    Ok(point)
}

fn parse_fq2(pair: &[String]) -> Result<Fq2, String> {
    let [c0, c1] = pair else {
        return Err(format!("Fq2 element needs 2 components, got {}", pair.len()));
    };
    Ok(Fq2::new(parse_field::<Fq>(c0)?, parse_field::<Fq>(c1)?))
}

pub fn parse_g2(coords: &[Vec<String>]) -> Result<G2Affine, String> {
    let [x, y, z] = coords else {
        return Err(format!("G2 point needs 3 coordinates, got {}", coords.len()));
    };
    match z.as_slice() {
        [c0, c1] if is_zero(c0) && is_zero(c1) => return Ok(G2Affine::identity()),
        [c0, c1] if is_one(c0) && is_zero(c1) => {}
        _ => return Err(format!("G2 point is not affine: z = {z:?}")),
    }

    let point = G2Affine::new_unchecked(parse_fq2(x)?, parse_fq2(y)?);
    if !point.is_on_curve() {
        return Err("G2 point is not on the curve".into());
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err("G2 point is not in the prime-order subgroup".into());
    }
    Ok(point)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_ec::AffineRepr;

    pub const G2_X: [&str; 2] = [
        "10857046999023057135944570762232829481370756359578518086990519993285655852781",
        "11559732032986387107991004021392285783925812861821192530917403151452391805634",
    ];
    pub const G2_Y: [&str; 2] = [
        "8495653923123431417604973247489272438418190587263600148770280649306958101930",
        "4082367875863433681332203403145435568316851327593401208105741076214120093531",
    ];
    const FR_MODULUS: &str =
        "21888242871839275222246405745257275088548364400416034343698204186575808495617";

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_field_bounds() {
        assert_eq!(parse_field::<Fr>("0").unwrap(), Fr::from(0u64));
        assert_eq!(parse_field::<Fr>("23073").unwrap(), Fr::from(23073u64));
        assert!(parse_field::<Fr>(FR_MODULUS).is_err());
        assert!(parse_field::<Fr>("-1").is_err());
        assert!(parse_field::<Fr>("").is_err());
    }

    #[test]
    fn test_parse_g1_generator() {
        let point = parse_g1(&strings(&["1", "2", "1"])).unwrap();
        assert_eq!(point, G1Affine::generator());
    }

    #[test]
    fn test_parse_g1_infinity() {
        let point = parse_g1(&strings(&["0", "1", "0"])).unwrap();
        assert!(point.infinity);
    }

    #[test]
    fn test_parse_g1_rejects_off_curve() {
        assert!(parse_g1(&strings(&["1", "3", "1"])).is_err());
        assert!(parse_g1(&strings(&["1", "2", "2"])).is_err());
        assert!(parse_g1(&strings(&["1", "2"])).is_err());
    }

    #[test]
    fn test_parse_g2_generator() {
        let coords = vec![strings(&G2_X), strings(&G2_Y), strings(&["1", "0"])];
        assert_eq!(parse_g2(&coords).unwrap(), G2Affine::generator());
    }

    #[test]
    fn test_parse_g2_rejects_swapped_components() {
        let x = strings(&[G2_X[1], G2_X[0]]);
        let y = strings(&[G2_Y[1], G2_Y[0]]);
        assert!(parse_g2(&[x, y, strings(&["1", "0"])]).is_err());
    }
}
