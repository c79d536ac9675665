//! secp192r1 (NIST P-192): a three-limb `a = -3` curve.

use super::curve::CurveConstants;

pub(crate) const CONSTANTS: CurveConstants = CurveConstants {
    name: "secp192r1",
    num_words: 3,
    p: [
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFE,
        0xFFFF_FFFF_FFFF_FFFF,
        0,
    ],
    n: [
        0x146B_C9B1_B4D2_2831,
        0xFFFF_FFFF_99DE_F836,
        0xFFFF_FFFF_FFFF_FFFF,
        0,
    ],
    b: [
        0xFEB8_DEEC_C146_B9B1,
        0x0FA7_E9AB_7224_3049,
        0x6421_0519_E59C_80E7,
        0,
    ],
    gx: [
        0xF4FF_0AFD_82FF_1012,
        0x7CBF_20EB_43A1_8800,
        0x188D_A80E_B030_90F6,
        0,
    ],
    gy: [
        0x73F9_77A1_1E79_4811,
        0x6310_11ED_6B24_CDD5,
        0x0719_2B95_FFC8_DA78,
        0,
    ],
};
