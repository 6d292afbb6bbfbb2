use fibsq_stark::field::FieldElement;
use fibsq_stark::merkle::{
    compute_root_from_path, encode_leaf, verify_path, MerkleError, MerkleTree,
};
use proptest::prelude::*;

fn values(seed: u64, count: usize) -> Vec<FieldElement> {
    (0..count as u64)
        .map(|i| FieldElement::from(seed.wrapping_mul(31).wrapping_add(i * 7)))
        .collect()
}

#[test]
fn encoded_leaf_is_length_prefixed() {
    let encoded = encode_leaf(&FieldElement::from(0x0102_0304u64));
    assert_eq!(hex::encode(&encoded), "080000000403020100000000");
}

#[test]
fn wrong_leaf_count_is_rejected() -> Result<(), MerkleError> {
    let leaves = values(5, 8);
    let tree = MerkleTree::from_leaves(&leaves);
    let path = tree.open(3)?;
    assert!(verify_path(&leaves[3], 3, 16, &path, &tree.root()).is_err());
    assert_eq!(
        verify_path(&leaves[3], 9, 8, &path, &tree.root()),
        Err(MerkleError::IndexOutOfRange {
            index: 9,
            leaf_count: 8
        })
    );
    Ok(())
}

proptest! {
    #[test]
    fn every_opening_verifies(seed in any::<u64>(), count in 1usize..70, pick in any::<usize>()) {
        let leaves = values(seed, count);
        let tree = MerkleTree::from_leaves(&leaves);
        let index = pick % count;
        let path = tree.open(index).expect("index in range");
        prop_assert_eq!(
            compute_root_from_path(&encode_leaf(&leaves[index]), index, count, &path),
            Ok(tree.root())
        );
        prop_assert!(verify_path(&leaves[index], index, count, &path, &tree.root()).is_ok());
    }

    #[test]
    fn foreign_value_never_verifies(seed in any::<u64>(), count in 2usize..40, pick in any::<usize>()) {
        let leaves = values(seed, count);
        let tree = MerkleTree::from_leaves(&leaves);
        let index = pick % count;
        let other = (index + 1) % count;
        prop_assume!(leaves[index] != leaves[other]);
        let path = tree.open(index).expect("index in range");
        prop_assert_eq!(
            verify_path(&leaves[other], index, count, &path, &tree.root()),
            Err(MerkleError::RootMismatch)
        );
    }
}
