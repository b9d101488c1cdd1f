#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use dibuilder::{container, Builder, Container, InstantiateErrorKind};
use std::sync::Arc;

struct A(Arc<B>, Arc<C>);
struct B(i32);
struct C(Arc<CA>);
struct CA(Arc<CAA>);
struct CAA(Arc<CAAA>);
struct CAAA;

#[inline]
fn chain(singleton: bool) -> Container {
    if singleton {
        container! {
            "CAAA" => singleton(|_| Ok::<_, InstantiateErrorKind>(CAAA)),
            "CAA" => singleton(|builder| Ok::<_, InstantiateErrorKind>(CAA(builder.build("CAAA")?))),
            "CA" => singleton(|builder| Ok::<_, InstantiateErrorKind>(CA(builder.build("CAA")?))),
            "C" => singleton(|builder| Ok::<_, InstantiateErrorKind>(C(builder.build("CA")?))),
            "B" => value(B(2)),
            "A" => singleton(|builder| Ok::<_, InstantiateErrorKind>(A(builder.build("B")?, builder.build("C")?))),
        }
        .unwrap()
    } else {
        container! {
            "CAAA" => prototype(|_| Ok::<_, InstantiateErrorKind>(CAAA)),
            "CAA" => prototype(|builder| Ok::<_, InstantiateErrorKind>(CAA(builder.build("CAAA")?))),
            "CA" => prototype(|builder| Ok::<_, InstantiateErrorKind>(CA(builder.build("CAA")?))),
            "C" => prototype(|builder| Ok::<_, InstantiateErrorKind>(C(builder.build("CA")?))),
            "B" => value(B(2)),
            "A" => prototype(|builder| Ok::<_, InstantiateErrorKind>(A(builder.build("B")?, builder.build("C")?))),
        }
        .unwrap()
    }
}

#[inline]
fn builder_build(builder: &mut Builder) {
    let _ = builder.build::<A>("A").unwrap();
}

#[inline]
fn builder_new_object(builder: &mut Builder) {
    let _ = builder.new_object::<B>("B", (B(3),)).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let prototypes = chain(false);
    let singletons = chain(true);

    c.bench_function("container_new_with_macro", |b| b.iter(|| chain(false)))
        .bench_function("builder_register_container", |b| {
            b.iter(|| Builder::new().register_container(&prototypes))
        })
        .bench_function("builder_build_prototype", |b| {
            let mut builder = Builder::with_container(prototypes.clone());
            b.iter(|| builder_build(&mut builder))
        })
        .bench_function("builder_build_singleton", |b| {
            b.iter(|| builder_build(&mut Builder::with_container(singletons.clone())))
        })
        .bench_function("builder_build_singleton_with_cache", |b| {
            let mut builder = Builder::with_container(singletons.clone());
            b.iter(|| builder_build(&mut builder))
        })
        .bench_function("builder_new_object", |b| {
            let mut builder = Builder::with_container(prototypes.clone());
            b.iter(|| builder_new_object(&mut builder))
        });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
