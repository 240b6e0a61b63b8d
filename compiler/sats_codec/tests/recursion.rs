//! Recursive type graphs: compilation terminates, values of any depth round trip.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use sats_codec::{AlgebraicType, AlgebraicValue, Codec, Typespace};
use sats_types::{AlgebraicTypeRef, ProductTypeElement, SumTypeVariant};

/// `&0 = (value: U32, next: option<&0>)`
fn linked_list() -> (Typespace, AlgebraicTypeRef) {
    let mut ts = Typespace::default();
    let node = ts.next_ref();
    ts.add(AlgebraicType::product([
        ProductTypeElement::named("value", AlgebraicType::U32),
        ProductTypeElement::named("next", AlgebraicType::option(AlgebraicType::Ref(node))),
    ]));
    (ts, node)
}

fn list_value(len: u32) -> AlgebraicValue {
    let mut tail = AlgebraicValue::none();
    for i in (0..len).rev() {
        tail = AlgebraicValue::some(AlgebraicValue::product([i.into(), tail]));
    }
    match tail {
        AlgebraicValue::Option(Some(head)) => *head,
        _ => panic!("list_value needs len > 0"),
    }
}

#[test]
fn self_referential_product_round_trips() {
    let (ts, node) = linked_list();
    let codec = Codec::new(&AlgebraicType::Ref(node), Some(&ts)).unwrap();

    let value = list_value(3);
    let bytes = codec.to_vec(&value).unwrap();
    assert_eq!(
        bytes,
        [
            0, 0, 0, 0, 0, // 0, some
            1, 0, 0, 0, 0, // 1, some
            2, 0, 0, 0, 1, // 2, none
        ]
    );
    assert_eq!(codec.from_slice(&bytes).unwrap(), value);
}

#[test]
fn deep_values_do_not_overflow_the_stack() {
    let (ts, node) = linked_list();
    let codec = Codec::new(&AlgebraicType::Ref(node), Some(&ts)).unwrap();

    let value = list_value(20_000);
    let bytes = codec.to_vec(&value).unwrap();
    assert_eq!(bytes.len(), 20_000 * 5);

    // Derived `PartialEq` and `Drop` recurse without stack growth, so compare
    // by re-encoding and unwind the values by hand.
    let decoded = codec.from_slice(&bytes).unwrap();
    assert!(codec.to_vec(&decoded).unwrap() == bytes);
    drop_list(decoded);
    drop_list(value);
}

fn drop_list(mut value: AlgebraicValue) {
    loop {
        let AlgebraicValue::Product(fields) = value else {
            return;
        };
        let mut fields = fields.into_vec();
        match fields.pop() {
            Some(AlgebraicValue::Option(Some(next))) => value = *next,
            _ => return,
        }
    }
}

#[test]
fn tree_through_array_and_sum() {
    // &0 = (leaf: U8 | node: Array<&0>)
    let ts = Typespace::new(vec![AlgebraicType::sum([
        SumTypeVariant::named("leaf", AlgebraicType::U8),
        SumTypeVariant::named(
            "node",
            AlgebraicType::array(AlgebraicType::Ref(AlgebraicTypeRef(0))),
        ),
    ])]);
    let codec = Codec::new(&AlgebraicType::Ref(AlgebraicTypeRef(0)), Some(&ts)).unwrap();

    let value = AlgebraicValue::sum(
        "node",
        AlgebraicValue::array([
            AlgebraicValue::sum("leaf", 1u8.into()),
            AlgebraicValue::sum("node", AlgebraicValue::array([])),
        ]),
    );
    let bytes = codec.to_vec(&value).unwrap();
    assert_eq!(
        bytes,
        [1, 2, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0]
    );
    assert_eq!(codec.from_slice(&bytes).unwrap(), value);
}

#[test]
fn array_only_recursion() {
    // &0 = Array<&0>
    let ts = Typespace::new(vec![AlgebraicType::array(AlgebraicType::Ref(
        AlgebraicTypeRef(0),
    ))]);
    let codec = Codec::new(&AlgebraicType::Ref(AlgebraicTypeRef(0)), Some(&ts)).unwrap();

    let value = AlgebraicValue::array([
        AlgebraicValue::array([]),
        AlgebraicValue::array([AlgebraicValue::array([])]),
    ]);
    let bytes = codec.to_vec(&value).unwrap();
    assert_eq!(
        bytes,
        [2, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0]
    );
    assert_eq!(codec.from_slice(&bytes).unwrap(), value);
}

#[test]
fn mutual_recursion() {
    // &0 = (name: String, children: Array<&1>)
    // &1 = (dir: &0 | file: String)
    let ts = Typespace::new(vec![
        AlgebraicType::product([
            ProductTypeElement::named("name", AlgebraicType::String),
            ProductTypeElement::named(
                "children",
                AlgebraicType::array(AlgebraicType::Ref(AlgebraicTypeRef(1))),
            ),
        ]),
        AlgebraicType::sum([
            SumTypeVariant::named("dir", AlgebraicType::Ref(AlgebraicTypeRef(0))),
            SumTypeVariant::named("file", AlgebraicType::String),
        ]),
    ]);
    let codec = Codec::new(&AlgebraicType::Ref(AlgebraicTypeRef(0)), Some(&ts)).unwrap();

    let value = AlgebraicValue::product([
        "root".into(),
        AlgebraicValue::array([
            AlgebraicValue::sum("file", "a".into()),
            AlgebraicValue::sum(
                "dir",
                AlgebraicValue::product(["sub".into(), AlgebraicValue::array([])]),
            ),
        ]),
    ]);
    let bytes = codec.to_vec(&value).unwrap();
    assert_eq!(codec.from_slice(&bytes).unwrap(), value);
}

#[test]
fn inline_type_referring_to_recursive_entry() {
    let (ts, node) = linked_list();
    let ty = AlgebraicType::product([
        AlgebraicType::Ref(node),
        AlgebraicType::Ref(node),
    ]);
    let codec = Codec::new(&ty, Some(&ts)).unwrap();
    let value = AlgebraicValue::product([list_value(1), list_value(2)]);
    let bytes = codec.to_vec(&value).unwrap();
    assert_eq!(codec.from_slice(&bytes).unwrap(), value);
}
