use linked_bst::Tree;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same set of keys in both.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree, set: &mut BTreeSet<i32>) {
    for op in ops {
        match *op {
            Op::Insert(k) => {
                tree.insert(i32::from(k));
                set.insert(i32::from(k));
            }
            Op::Remove(k) => {
                tree.remove(i32::from(k));
                set.remove(&i32::from(k));
            }
        }
    }
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set);
        tree.iter().eq(set.iter().copied())
            && tree.min() == set.first().copied()
            && tree.max() == set.last().copied()
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree = xs.iter().map(|x| i32::from(*x)).collect::<Tree>();

        xs.iter()
            .all(|x| tree.search(i32::from(*x)).and_then(|n| tree.key(n)) == Some(i32::from(*x)))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = xs.iter().map(|x| i32::from(*x)).collect::<Tree>();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.search(i32::from(*x)).is_none())
    }
}

quickcheck::quickcheck! {
    fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
        let mut tree = xs.iter().map(|x| i32::from(*x)).collect::<Tree>();
        for remove in &removes {
            tree.remove(i32::from(*remove));
        }

        let mut still_present = xs;
        for remove in &removes {
            // We may have inserted the same key multiple times - drop each one.
            still_present.retain(|x| x != remove);
        }

        removes.iter().all(|x| !tree.contains(i32::from(*x)))
            && still_present.iter().all(|x| tree.contains(i32::from(*x)))
    }
}

quickcheck::quickcheck! {
    fn predecessor_chain_is_descending(xs: Vec<i16>) -> bool {
        let tree = xs.iter().map(|x| i32::from(*x)).collect::<Tree>();
        let mut keys = Vec::new();
        let mut current = tree.root().and_then(|root| tree.maximum(root));
        while let Some(node) = current {
            keys.push(tree.key(node).unwrap());
            current = tree.predecessor(node);
        }

        keys.len() == tree.len() && keys.windows(2).all(|w| w[0] > w[1])
    }
}

quickcheck::quickcheck! {
    fn height_bounds(xs: Vec<i8>) -> bool {
        let tree = xs.iter().map(|x| i32::from(*x)).collect::<Tree>();
        let n = tree.len() as isize;

        if n == 0 {
            return tree.height() == -1 && tree.density() == 0.0;
        }
        // A chain is as tall as it gets; a complete tree is as short.
        let density = tree.density();
        tree.height() <= n - 1
            && (tree.height() as f64 + 1.0).exp2() - 1.0 >= n as f64
            && density > 0.0
            && density <= 1.0
    }
}

#[test]
fn removing_a_two_child_node_keeps_order() {
    let mut tree = [7, 4, 9, 2, 5, 6, 1, 8, 3, 10].into_iter().collect::<Tree>();

    assert!(tree.remove(4));
    assert_eq!(tree.len(), 9);
    assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1, 2, 3, 5, 6, 7, 8, 9, 10]);
}
