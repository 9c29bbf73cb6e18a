use courier_message::{add_child, validate_document, ComponentType, Document, RootType};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// V2 document with `sections` sections, each with text and a button accessory
fn large_document(sections: usize) -> Document {
    let mut doc = Document::new(RootType::V2);
    let root = doc.root_id().clone();

    for _ in 0..sections {
        let Ok(section) = add_child(&doc, &root, ComponentType::Section, false) else {
            break;
        };
        doc = section.document;

        for _ in 0..3 {
            if let Ok(text) = add_child(&doc, &section.created_id, ComponentType::TextDisplay, false) {
                doc = text.document;
            }
        }

        if let Ok(button) = add_child(&doc, &section.created_id, ComponentType::Button, true) {
            doc = button.document;
        }
    }

    doc
}

fn bench_validate(c: &mut Criterion) {
    let small = large_document(10);
    let large = large_document(200);

    c.bench_function("validate_10_sections", |b| {
        b.iter(|| validate_document(black_box(&small)))
    });

    c.bench_function("validate_200_sections", |b| {
        b.iter(|| validate_document(black_box(&large)))
    });
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
