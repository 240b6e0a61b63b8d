//! Property tests: round trips, packed/per-field equivalence, map-key equality.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::strategy::Union;
use sats_codec::{into_map_key, AlgebraicType, AlgebraicValue, Codec, CodecConfig, Typespace};
use sats_types::{AlgebraicTypeRef, ProductTypeElement, ScalarKind, SumTypeVariant, F32, F64, I256, U256};

fn scalar_kind() -> impl Strategy<Value = ScalarKind> {
    proptest::sample::select(ScalarKind::ALL.to_vec())
}

fn fixed_kind() -> impl Strategy<Value = ScalarKind> {
    proptest::sample::select(
        ScalarKind::ALL
            .into_iter()
            .filter(|kind| kind.fixed_width().is_some())
            .collect::<Vec<_>>(),
    )
}

fn algebraic_type() -> impl Strategy<Value = AlgebraicType> {
    let leaf = scalar_kind().prop_map(AlgebraicType::from);
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(|elems| AlgebraicType::product(elems)),
            inner.clone().prop_map(AlgebraicType::array),
            Just(AlgebraicType::bytes()),
            inner.clone().prop_map(AlgebraicType::option),
            (inner.clone(), inner.clone()).prop_map(|(ok, err)| AlgebraicType::result(ok, err)),
            vec(inner, 1..4).prop_map(|tys| {
                AlgebraicType::sum(
                    tys.into_iter()
                        .enumerate()
                        .map(|(i, ty)| SumTypeVariant::named(&format!("v{i}"), ty)),
                )
            }),
        ]
    })
}

fn scalar_value(kind: ScalarKind) -> BoxedStrategy<AlgebraicValue> {
    match kind {
        ScalarKind::Bool => any::<bool>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::I8 => any::<i8>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::U8 => any::<u8>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::I16 => any::<i16>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::U16 => any::<u16>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::I32 => any::<i32>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::U32 => any::<u32>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::I64 => any::<i64>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::U64 => any::<u64>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::I128 => any::<i128>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::U128 => any::<u128>().prop_map(AlgebraicValue::from).boxed(),
        ScalarKind::I256 => any::<[u64; 4]>()
            .prop_map(|words| I256::from_words(words).into())
            .boxed(),
        ScalarKind::U256 => any::<[u64; 4]>()
            .prop_map(|words| U256::from_words(words).into())
            .boxed(),
        ScalarKind::F32 => any::<u32>()
            .prop_map(|bits| F32::from_bits(bits).into())
            .boxed(),
        ScalarKind::F64 => any::<u64>()
            .prop_map(|bits| F64::from_bits(bits).into())
            .boxed(),
        ScalarKind::String => any::<String>().prop_map(AlgebraicValue::from).boxed(),
    }
}

/// Values of `ty`, in the form the decoder produces.
fn value_of(ty: &AlgebraicType) -> BoxedStrategy<AlgebraicValue> {
    if let Some(kind) = ty.as_scalar() {
        return scalar_value(kind);
    }
    match ty {
        AlgebraicType::Array(_) if ty.is_bytes() => {
            vec(any::<u8>(), 0..8)
                .prop_map(|bytes| AlgebraicValue::bytes(bytes))
                .boxed()
        }
        AlgebraicType::Array(array) => vec(value_of(&array.elem_ty), 0..4)
            .prop_map(|elems| AlgebraicValue::array(elems))
            .boxed(),
        AlgebraicType::Product(product) => product
            .elements
            .iter()
            .map(|elem| value_of(&elem.algebraic_type))
            .collect::<Vec<_>>()
            .prop_map(|fields| AlgebraicValue::product(fields))
            .boxed(),
        AlgebraicType::Sum(sum) => {
            if let Some(some) = sum.as_option() {
                return prop_oneof![
                    Just(AlgebraicValue::none()),
                    value_of(some).prop_map(AlgebraicValue::some),
                ]
                .boxed();
            }
            if let Some((ok, err)) = sum.as_result() {
                return prop_oneof![
                    value_of(ok).prop_map(AlgebraicValue::ok),
                    value_of(err).prop_map(AlgebraicValue::err),
                ]
                .boxed();
            }
            Union::new(sum.variants.iter().enumerate().map(|(i, variant)| {
                let tag = sum.variant_tag(i).unwrap();
                value_of(&variant.algebraic_type)
                    .prop_map(move |v| AlgebraicValue::sum(tag.clone(), v))
                    .boxed()
            }))
            .boxed()
        }
        _ => unreachable!("generated types contain no refs"),
    }
}

fn typed_value() -> impl Strategy<Value = (AlgebraicType, AlgebraicValue)> {
    algebraic_type().prop_flat_map(|ty| {
        let values = value_of(&ty);
        (Just(ty), values)
    })
}

fn typed_value_pair() -> impl Strategy<Value = (AlgebraicType, AlgebraicValue, AlgebraicValue)> {
    algebraic_type().prop_flat_map(|ty| {
        let values = value_of(&ty);
        (Just(ty), values.clone(), values)
    })
}

fn fixed_product() -> impl Strategy<Value = (AlgebraicType, AlgebraicValue)> {
    vec(fixed_kind(), 1..8).prop_flat_map(|kinds| {
        let ty = AlgebraicType::product(kinds.iter().map(|&kind| AlgebraicType::from(kind)));
        let values = kinds.into_iter().map(scalar_value).collect::<Vec<_>>();
        (Just(ty), values.prop_map(|fields| AlgebraicValue::product(fields)))
    })
}

fn linked_list() -> (Typespace, AlgebraicTypeRef) {
    let mut ts = Typespace::default();
    let node = ts.next_ref();
    ts.add(AlgebraicType::product([
        ProductTypeElement::named("value", AlgebraicType::U32),
        ProductTypeElement::named("next", AlgebraicType::option(AlgebraicType::Ref(node))),
    ]));
    (ts, node)
}

proptest! {
    #[test]
    fn round_trip((ty, value) in typed_value()) {
        let codec = Codec::new(&ty, None).unwrap();
        let bytes = codec.to_vec(&value).unwrap();
        prop_assert_eq!(codec.from_slice(&bytes).unwrap(), value);
    }

    #[test]
    fn packed_layout_matches_per_field((ty, value) in fixed_product()) {
        let packed = Codec::new(&ty, None).unwrap();
        let per_field =
            Codec::with_config(&ty, None, &CodecConfig::default().with_fixed_layouts(false)).unwrap();
        prop_assert!(packed.fixed_size().is_some());
        prop_assert_eq!(per_field.fixed_size(), None);

        let packed_bytes = packed.to_vec(&value).unwrap();
        let per_field_bytes = per_field.to_vec(&value).unwrap();
        prop_assert_eq!(&packed_bytes, &per_field_bytes);
        prop_assert_eq!(Some(packed_bytes.len()), packed.fixed_size());

        prop_assert_eq!(packed.from_slice(&per_field_bytes).unwrap(), value.clone());
        prop_assert_eq!(per_field.from_slice(&packed_bytes).unwrap(), value);
    }

    #[test]
    fn map_keys_equal_iff_values_equal((ty, a, b) in typed_value_pair()) {
        let key_a = into_map_key(&ty, &a, None).unwrap();
        let key_b = into_map_key(&ty, &b, None).unwrap();
        prop_assert_eq!(a == b, key_a == key_b);
        prop_assert_eq!(&key_a, &into_map_key(&ty, &a.clone(), None).unwrap());
    }

    #[test]
    fn recursive_list_round_trips(items in vec(any::<u32>(), 1..32)) {
        let (ts, node) = linked_list();
        let codec = Codec::new(&AlgebraicType::Ref(node), Some(&ts)).unwrap();

        let mut value = AlgebraicValue::none();
        for item in items.iter().rev() {
            value = AlgebraicValue::some(AlgebraicValue::product([(*item).into(), value]));
        }
        let AlgebraicValue::Option(Some(head)) = value else {
            unreachable!("items is non-empty");
        };

        let bytes = codec.to_vec(&head).unwrap();
        prop_assert_eq!(bytes.len(), items.len() * 5);
        prop_assert_eq!(codec.from_slice(&bytes).unwrap(), *head);
    }
}
