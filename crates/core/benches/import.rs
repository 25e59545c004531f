use criterion::{Criterion, black_box, criterion_group, criterion_main};
use blogshift_core::{Document, Importer, MarkdownConfig, builtin_profile, prune_html};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn bench_prune(c: &mut Criterion) {
    let html = fixture("blog_post.html");
    let profile = builtin_profile("blog").unwrap();

    c.bench_function("prune", |b| b.iter(|| prune_html(black_box(&html), &profile.prune)));
}

fn bench_parse(c: &mut Criterion) {
    let html = fixture("blog_post.html");

    c.bench_function("parse", |b| b.iter(|| Document::parse(black_box(&html))));
}

fn bench_full_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");

    for (profile, url, name) in [
        ("blog", "https://example.com/en/blog/2023/shipping-faster/", "blog_post.html"),
        ("blog-v2", "https://example.com/en/blog/2024/block-documents", "blog_post_v2.html"),
    ] {
        let html = fixture(name);
        let importer = Importer::with_profile(builtin_profile(profile).unwrap());

        group.bench_function(profile, |b| b.iter(|| importer.process(black_box(url), black_box(&html))));
    }

    group.finish();
}

fn bench_markdown(c: &mut Criterion) {
    let html = fixture("blog_post.html");
    let resource = Importer::new().process("https://example.com/en/blog/2023/shipping-faster/", &html).unwrap();
    let config = MarkdownConfig::default();

    c.bench_function("to_markdown", |b| b.iter(|| resource.to_markdown(black_box(&config))));
}

criterion_group!(benches, bench_prune, bench_parse, bench_full_import, bench_markdown);
criterion_main!(benches);
