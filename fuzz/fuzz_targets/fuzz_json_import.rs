#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_interchange::bridge::json::from_json;
use sbom_interchange::import::{flatten, select_root};

/// Fuzz the SPDX JSON reader and the graph flattener behind it.
///
/// Wraps input in a document envelope so the package mapping is reached
/// rather than failing on the outer structure.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        import(s);

        if s.len() < 10_000 {
            let wrapped = format!(
                r#"{{"spdxVersion":"SPDX-2.3","SPDXID":"SPDXRef-DOCUMENT","name":"fuzz","documentNamespace":"https://example.com/fuzz","documentDescribes":["SPDXRef-root"],"packages":[{s}]}}"#,
            );
            import(&wrapped);
        }
    }
});

fn import(content: &str) {
    if let Ok(doc) = from_json(content) {
        let _ = doc.verify();
        if let Ok(root) = select_root(&doc) {
            let _ = flatten(&doc, root);
        }
    }
}
