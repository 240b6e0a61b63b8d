use super::*;
use crate::ProductTypeElement;
use pretty_assertions::assert_eq;

#[test]
fn add_hands_out_sequential_refs() {
    let mut ts = Typespace::default();
    assert!(ts.is_empty());
    assert_eq!(ts.next_ref(), AlgebraicTypeRef(0));
    let a = ts.add(AlgebraicType::U8);
    let b = ts.add(AlgebraicType::String);
    assert_eq!((a, b), (AlgebraicTypeRef(0), AlgebraicTypeRef(1)));
    assert_eq!(ts.len(), 2);
    assert_eq!(ts.get(b), Some(&AlgebraicType::String));
    assert_eq!(ts[a], AlgebraicType::U8);
}

#[test]
fn get_out_of_bounds_is_none() {
    let ts = Typespace::new(vec![AlgebraicType::Bool]);
    assert_eq!(ts.get(AlgebraicTypeRef(1)), None);
}

#[test]
fn resolve_follows_ref_chains() {
    let ts: Typespace = [
        AlgebraicType::Ref(AlgebraicTypeRef(1)),
        AlgebraicType::Ref(AlgebraicTypeRef(2)),
        AlgebraicType::I32,
    ]
    .into_iter()
    .collect();

    let resolved = ts.resolve(AlgebraicTypeRef(0)).unwrap();
    assert_eq!(resolved.ty, &AlgebraicType::I32);
    assert_eq!(
        resolved.chain.as_slice(),
        &[AlgebraicTypeRef(0), AlgebraicTypeRef(1), AlgebraicTypeRef(2)]
    );
}

#[test]
fn resolve_reports_dangling_ref() {
    let ts = Typespace::new(vec![AlgebraicType::Ref(AlgebraicTypeRef(7))]);
    assert_eq!(
        ts.resolve(AlgebraicTypeRef(0)),
        Err(TypeRefError::InvalidTypeRef(AlgebraicTypeRef(7)))
    );
}

#[test]
fn resolve_reports_self_ref() {
    let ts = Typespace::new(vec![AlgebraicType::Ref(AlgebraicTypeRef(0))]);
    assert_eq!(
        ts.resolve(AlgebraicTypeRef(0)),
        Err(TypeRefError::RecursiveTypeRef(AlgebraicTypeRef(0)))
    );
}

#[test]
fn resolve_reports_ref_loop() {
    let ts = Typespace::new(vec![
        AlgebraicType::Ref(AlgebraicTypeRef(1)),
        AlgebraicType::Ref(AlgebraicTypeRef(0)),
    ]);
    assert_eq!(
        ts.resolve(AlgebraicTypeRef(0)),
        Err(TypeRefError::RecursiveTypeRef(AlgebraicTypeRef(0)))
    );
}

#[test]
fn recursion_through_a_product_resolves() {
    let mut ts = Typespace::default();
    let node = ts.next_ref();
    ts.add(AlgebraicType::product([
        ProductTypeElement::named("value", AlgebraicType::U32),
        ProductTypeElement::named("next", AlgebraicType::option(AlgebraicType::Ref(node))),
    ]));

    let resolved = ts.resolve(node).unwrap();
    assert!(matches!(resolved.ty, AlgebraicType::Product(_)));
    assert_eq!(resolved.chain.as_slice(), &[node]);
}

#[test]
fn iter_yields_refs_in_order() {
    let ts = Typespace::new(vec![AlgebraicType::U8, AlgebraicType::U16]);
    let refs: Vec<_> = ts.iter().map(|(r, _)| r).collect();
    assert_eq!(refs, vec![AlgebraicTypeRef(0), AlgebraicTypeRef(1)]);
}
