use super::*;
use pretty_assertions::assert_eq;
use sats_types::ProductTypeElement;
use std::thread;

fn point() -> AlgebraicType {
    AlgebraicType::product([
        ProductTypeElement::named("x", AlgebraicType::I32),
        ProductTypeElement::named("y", AlgebraicType::I32),
    ])
}

fn shared_typespace() -> Arc<Typespace> {
    let mut ts = Typespace::default();
    ts.add(point());
    let list = ts.next_ref();
    ts.add(AlgebraicType::product([
        ProductTypeElement::named("head", AlgebraicType::U8),
        ProductTypeElement::named("tail", AlgebraicType::option(AlgebraicType::Ref(list))),
    ]));
    Arc::new(ts)
}

#[test]
fn codecs_are_built_once() {
    let cache = CodecCache::without_typespace();
    assert!(cache.is_empty());
    let a = cache.codec(&point()).unwrap();
    let b = cache.codec(&point()).unwrap();
    assert_eq!(cache.len(), 1);
    assert!(std::ptr::eq(a.program(), b.program()));
}

#[test]
fn ref_codecs_live_in_the_dense_table() {
    let cache = CodecCache::new(shared_typespace());
    let by_ref = cache.codec_for_ref(AlgebraicTypeRef(1)).unwrap();
    let through_ty = cache.codec(&AlgebraicType::Ref(AlgebraicTypeRef(1))).unwrap();
    assert!(std::ptr::eq(by_ref.program(), through_ty.program()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn ref_errors() {
    let cache = CodecCache::new(shared_typespace());
    assert_eq!(
        cache.codec_for_ref(AlgebraicTypeRef(9)).unwrap_err(),
        TypeRefError::InvalidTypeRef(AlgebraicTypeRef(9))
    );

    let bare = CodecCache::without_typespace();
    assert_eq!(
        bare.codec_for_ref(AlgebraicTypeRef(0)).unwrap_err(),
        TypeRefError::MissingTypespace(AlgebraicTypeRef(0))
    );
}

#[test]
fn serialize_and_deserialize_through_the_cache() {
    let cache = CodecCache::new(shared_typespace());
    let ty = AlgebraicType::Ref(AlgebraicTypeRef(1));
    let value = AlgebraicValue::product([
        1u8.into(),
        AlgebraicValue::some(AlgebraicValue::product([
            2u8.into(),
            AlgebraicValue::none(),
        ])),
    ]);

    let mut w = Writer::new();
    cache.serialize(&mut w, &ty, &value).unwrap();
    assert_eq!(w.as_bytes(), &[1, 0, 2, 1]);

    let mut r = Reader::new(w.as_bytes());
    assert_eq!(cache.deserialize(&mut r, &ty).unwrap(), value);
    assert!(r.is_empty());
}

#[test]
fn map_key_shortcut_does_not_compile() {
    let cache = CodecCache::without_typespace();
    let key = cache.map_key(&AlgebraicType::U32, &9u32.into()).unwrap();
    assert!(matches!(key, MapKey::Unsigned(_)));
    assert!(cache.is_empty());

    let fallback = cache
        .map_key(&point(), &AlgebraicValue::product([1i32.into(), 2i32.into()]))
        .unwrap();
    assert!(matches!(fallback, MapKey::Text(_)));
    assert_eq!(cache.len(), 1);
}

#[test]
fn concurrent_first_use_builds_one_codec() {
    let cache = Arc::new(CodecCache::new(shared_typespace()));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.codec_for_ref(AlgebraicTypeRef(0)).unwrap())
        })
        .collect();
    let codecs: Vec<Codec> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(cache.len(), 1);
    for codec in &codecs[1..] {
        assert!(std::ptr::eq(codecs[0].program(), codec.program()));
    }
}

#[test]
fn config_carries_into_compiled_codecs() {
    let cache =
        CodecCache::without_typespace().with_config(CodecConfig::default().with_fixed_layouts(false));
    assert_eq!(cache.codec(&point()).unwrap().fixed_size(), None);

    let packed = CodecCache::without_typespace();
    assert_eq!(packed.codec(&point()).unwrap().fixed_size(), Some(8));
}
