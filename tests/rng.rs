use std::thread;

use cryptal_ecc::rng::{self, OsRng};
use rand_core::RngCore;

#[test]
fn test_fill_produces_distinct_output() {
    let mut a = [0u8; 64];
    let mut b = [0u8; 64];

    rng::fill(&mut a).unwrap();
    rng::fill(&mut b).unwrap();

    assert_ne!(a, [0u8; 64]);
    assert_ne!(a, b);
}

#[test]
fn test_fill_empty_and_large_buffers() {
    rng::fill(&mut []).unwrap();

    let mut large = vec![0u8; 1 << 20];
    rng::fill(&mut large).unwrap();
    assert!(large.iter().any(|&byte| byte != 0));
}

#[test]
fn test_os_rng_traits() {
    let mut rng = OsRng;

    assert_ne!(rng.next_u64(), rng.next_u64());

    let mut buf = [0u8; 32];
    rng.try_fill_bytes(&mut buf).unwrap();
    assert_ne!(buf, [0u8; 32]);
}

#[test]
fn test_concurrent_fills() {
    let outputs: Vec<[u8; 32]> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let mut buf = [0u8; 32];
                    rng::fill(&mut buf).unwrap();
                    buf
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, a) in outputs.iter().enumerate() {
        for b in &outputs[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
