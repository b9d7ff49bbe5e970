use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tera::Context;

use docmill_render::error::RenderError;
use docmill_render::template::{EmbeddedTemplates, TemplateCache, TemplateLoader};

struct CountingLoader {
    calls: Arc<AtomicUsize>,
    source: &'static str,
}

impl TemplateLoader for CountingLoader {
    fn load(&self, _key: &str) -> Result<String, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.source.to_string())
    }
}

#[test]
fn compiles_each_key_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = TemplateCache::new(Box::new(CountingLoader {
        calls: calls.clone(),
        source: "Hello {{ name }}!",
    }));

    let mut ctx = Context::new();
    ctx.insert("name", "Ada");

    let first = cache.render("greeting", &ctx).unwrap();
    let second = cache.render("greeting", &ctx).unwrap();

    assert_eq!(first, "Hello Ada!");
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn malformed_template_is_a_compile_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = TemplateCache::new(Box::new(CountingLoader {
        calls,
        source: "{% for item in %}",
    }));

    let err = cache.render("broken", &Context::new()).unwrap_err();
    assert!(matches!(err, RenderError::TemplateCompile { .. }));
}

#[test]
fn unknown_key_is_not_found() {
    let cache = TemplateCache::new(Box::new(EmbeddedTemplates));
    let err = cache.render("no-such-template", &Context::new()).unwrap_err();
    assert!(matches!(err, RenderError::TemplateNotFound(_)));
}

#[test]
fn concurrent_first_use_compiles_idempotently() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = Arc::new(TemplateCache::new(Box::new(CountingLoader {
        calls: calls.clone(),
        source: "n = {{ n }}",
    })));

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let cache = cache.clone();
            std::thread::spawn(move || {
                let mut ctx = Context::new();
                ctx.insert("n", &n);
                cache.render("shared", &ctx).unwrap()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("n = {n}"));
    }
    // Losing racers may load the source more than once, but never corrupt
    // the cache.
    assert!(calls.load(Ordering::SeqCst) >= 1);
}
