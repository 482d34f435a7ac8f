//! Midpoint subnet derivation.
//!
//! Carves a pool out of the middle of a parent network: the child sits in
//! the parent's upper half, at a prefix roughly halfway between the parent
//! prefix and the full address width. Tools that allocate from the bottom up
//! or the top down of the parent are unlikely to collide with it.

use crate::error::PoolError;
use crate::models::Cidr;
use std::net::IpAddr;

/// Derive the midpoint subnet of `parent`.
///
/// The child prefix is `ones + (bits - ones) / 2`, rounding toward the
/// parent when the remaining width is odd. The child address is the first
/// host of the parent's upper half.
///
/// # Returns
/// * `Ok(Cidr)` - A subnet of `parent`, disjoint from its lower half
/// * `Err(PoolError::AddressSpaceExhausted)` - If `ones >= bits - 1`
pub fn midpoint_subnet(parent: &Cidr) -> Result<Cidr, PoolError> {
    let bits = parent.bits();
    let ones = parent.prefix;

    if ones >= bits - 1 {
        return Err(PoolError::AddressSpaceExhausted {
            cidr: parent.to_string(),
        });
    }

    let child_prefix = ones + (bits - ones) / 2;

    let addr = match parent.addr {
        IpAddr::V4(a) => {
            let mut octets = a.octets();
            advance_to_upper_half(&mut octets, ones);
            IpAddr::from(octets)
        }
        IpAddr::V6(a) => {
            let mut octets = a.octets();
            advance_to_upper_half(&mut octets, ones);
            IpAddr::from(octets)
        }
    };

    Ok(Cidr {
        addr,
        prefix: child_prefix,
    })
}

/// Advance `octets` in place to the first address of the network's upper
/// half: add the complement of the `(ones + 1)`-bit midpoint mask plus one,
/// least-significant byte first.
///
/// The carry moves left through a byte only while that byte's result wraps
/// to zero, and stops at the first byte that does not wrap.
fn advance_to_upper_half(octets: &mut [u8], ones: u8) {
    let midpoint = prefix_mask(octets.len(), ones + 1);

    let mut carry = 1u8;
    for i in (0..octets.len()).rev() {
        octets[i] |= (!midpoint[i]).wrapping_add(carry);
        if carry > 0 && octets[i] > 0 {
            carry = 0;
        }
    }
}

/// Build a mask of `len` bytes with exactly `ones` leading one-bits.
fn prefix_mask(len: usize, ones: u8) -> Vec<u8> {
    let mut mask = vec![0u8; len];
    let mut remaining = ones;
    for byte in mask.iter_mut() {
        let take = remaining.min(8);
        if take > 0 {
            *byte = 0xff << (8 - take);
        }
        remaining -= take;
    }
    mask
}
