//! End-to-end resolution scenarios against full chapter documents.

use rs_mangapages::{resolve, resolve_with_options, Options};

const CHAPTER_URL: &str = "https://site.com/manga/some-title/chapter-12/";

// "https://site.com/wp-content/uploads/2024/05/chapter-page-001.jpg" in hex,
// split over three variables declared out of name order.
const HEX_BLOCK: &str = r#"
    <div class="page-break"><script>
        var h1c = "6e74656e742f75706c6f6164732f323032342f30352f636861707465722d706167652d3030312e6a7067";
        var h1a = "68747470733a2f2f7369";
        var h1b = "74652e636f6d2f77702d636f";
    </script></div>
"#;

fn page_break_img(url: &str) -> String {
    format!(r#"<div class="page-break"><img src="{url}"></div>"#)
}

fn wrap(body: &str) -> String {
    format!(r#"<html><body><div class="reading-content">{body}</div></body></html>"#)
}

fn resolve_ok(html: &str) -> rs_mangapages::ChapterPages {
    match resolve(html, CHAPTER_URL) {
        Ok(chapter) => chapter,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn hex_variables_resolve_to_single_page() {
    let html = wrap(HEX_BLOCK);

    let result = resolve(&html, CHAPTER_URL);
    match result {
        Ok(chapter) => {
            assert_eq!(chapter.pages.len(), 1);
            assert_eq!(
                chapter.pages[0].image_url,
                "https://site.com/wp-content/uploads/2024/05/chapter-page-001.jpg"
            );
            assert_eq!(chapter.pages[0].index, 0);
            assert_eq!(chapter.pages[0].chapter_url, CHAPTER_URL);
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn split_pair_resolves_alongside_direct_images() {
    let mut body = String::new();
    // u1/u2 split pair -> chapter-page-004.jpg
    body.push_str(
        r#"<div class="page-break"><script>
            var u1 = "aHR0cHM6Ly9zaXRlLmNvbS93cC1jb250ZW50L3Vw";
            var u2 = "bG9hZHMvMjAyNC8wNS9jaGFwdGVyLXBhZ2UtMDA0LmpwZw==";
        </script></div>"#,
    );
    body.push_str(&page_break_img(
        "https://site.com/wp-content/uploads/2024/05/chapter-page-005.jpg",
    ));

    let html = wrap(&body);
    let chapter = resolve_ok(&html);
    assert_eq!(chapter.pages.len(), 2);
    assert!(chapter.pages[0].image_url.ends_with("chapter-page-004.jpg"));
    assert!(chapter.pages[1].image_url.ends_with("chapter-page-005.jpg"));
}

#[test]
fn trailing_short_named_decoy_is_removed() {
    // 20 legitimate pages plus one sabotage image with a 2-letter basename
    // living in an unrelated directory.
    let mut body = String::new();
    for i in 1..=20 {
        body.push_str(&page_break_img(&format!(
            "https://site.com/wp-content/uploads/2024/05/chapter-page-{i:03}.jpg"
        )));
    }
    body.push_str(&page_break_img("https://site.com/random/xy.png"));

    let html = wrap(&body);
    let chapter = resolve_ok(&html);
    assert_eq!(chapter.pages.len(), 20);
    let indices: Vec<usize> = chapter.pages.iter().map(|p| p.index).collect();
    let expected: Vec<usize> = (0..20).collect();
    assert_eq!(indices, expected);
    assert!(chapter.pages[19].image_url.ends_with("chapter-page-020.jpg"));
}

#[test]
fn trailing_page_in_unfamiliar_folder_is_dropped_by_heuristic() {
    // Long filename, so only the folder-comparison heuristic can catch it.
    let mut body = String::new();
    for i in 1..=5 {
        body.push_str(&page_break_img(&format!(
            "https://site.com/wp-content/uploads/2024/05/chapter-page-{i:03}.jpg"
        )));
    }
    body.push_str(&page_break_img(
        "https://site.com/wp-content/uploads/elsewhere/not-a-real-page-9.png",
    ));

    let html = wrap(&body);
    let chapter = resolve_ok(&html);
    assert_eq!(chapter.pages.len(), 5);

    // The heuristic can be switched off for sites with legitimately odd
    // final pages.
    let options = Options {
        drop_suspicious_last_page: false,
        ..Options::default()
    };
    let chapter = match resolve_with_options(&html, CHAPTER_URL, &options) {
        Ok(chapter) => chapter,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert_eq!(chapter.pages.len(), 6);
}

#[test]
fn token_attached_decode_wins_over_plain_duplicate() {
    // Same image twice: once as a plain http <img>, once decoded from the
    // obfuscated attribute with a security token. One page must survive,
    // keeping the token.
    let mut body = String::new();
    body.push_str(&page_break_img(
        "http://site.com/wp-content/uploads/2024/05/chapter-page-007.jpg",
    ));
    body.push_str(
        r#"<div class="page-break"><img
            data-obfuscated="aHR0cHM6Ly9zaXRlLmNvbS93cC1jb250ZW50L3VwbG9hZHMvMjAyNC8wNS9jaGFwdGVyLXBhZ2UtMDA3LmpwZw=="
            data-token="s3cr3t-token"></div>"#,
    );

    let html = wrap(&body);
    let chapter = resolve_ok(&html);
    assert_eq!(chapter.pages.len(), 1);
    assert_eq!(
        chapter.pages[0].image_url,
        "https://site.com/wp-content/uploads/2024/05/chapter-page-007.jpg#token=s3cr3t-token"
    );
    assert_eq!(chapter.pages[0].security_token(), Some("s3cr3t-token"));
    assert_eq!(
        chapter.pages[0].fetch_url(),
        (
            "https://site.com/wp-content/uploads/2024/05/chapter-page-007.jpg",
            Some("s3cr3t-token")
        )
    );
}

#[test]
fn duplicate_survivor_is_order_independent() {
    let lower = page_break_img("http://site.com/wp-content/uploads/2024/05/chapter-page-009.jpg");
    let higher = page_break_img("https://site.com/wp-content/uploads/2024/05/chapter-page-009.jpg");

    for body in [format!("{lower}{higher}"), format!("{higher}{lower}")] {
        let html = wrap(&body);
        let chapter = resolve_ok(&html);
        assert_eq!(chapter.pages.len(), 1);
        assert!(
            chapter.pages[0].image_url.starts_with("https://"),
            "https representation must win regardless of arrival order"
        );
    }
}

#[test]
fn decoy_segment_decode_contributes_no_page() {
    // The segment array decodes "successfully" but to a placeholder decoy;
    // the garbage filter must keep it out of the output.
    let body = r#"<div class="page-break"><script>
        imageSegments = ["aHR0cHM6Ly9kZWNveXMuZXhhbXBsZS9wbGFjZWhvbGRlci9wYWdlLmpwZw=="];
    </script></div>"#;

    let html = wrap(body);
    let chapter = resolve_ok(&html);
    assert!(chapter.pages.is_empty());
}

#[test]
fn unresolved_block_is_a_gap_not_an_error() {
    let mut body = String::new();
    body.push_str(&page_break_img(
        "https://site.com/wp-content/uploads/2024/05/chapter-page-001.jpg",
    ));
    body.push_str(r#"<div class="page-break"><script>// nothing to see</script></div>"#);
    body.push_str(&page_break_img(
        "https://site.com/wp-content/uploads/2024/05/chapter-page-002.jpg",
    ));

    let html = wrap(&body);
    let chapter = resolve_ok(&html);
    assert_eq!(chapter.pages.len(), 2);
    assert_eq!(chapter.pages[0].index, 0);
    assert_eq!(chapter.pages[1].index, 1);
    assert_eq!(chapter.warnings.len(), 1);
}

#[test]
fn direct_reading_content_scan_when_no_blocks_yield() {
    // Site variant: images sit directly in the reading container, no
    // page-break wrappers. Preloader images must be skipped.
    let html = r#"<html><body><div class="reading-content">
        <img class="img-preloader" src="https://site.com/theme/preloader-animation.gif">
        <img src="https://site.com/wp-content/uploads/2024/05/chapter-page-001.jpg">
        <img src="https://site.com/wp-content/uploads/2024/05/chapter-page-002.jpg">
    </div></body></html>"#;

    let chapter = resolve_ok(html);
    assert_eq!(chapter.pages.len(), 2);
    assert!(chapter.pages[0].image_url.ends_with("chapter-page-001.jpg"));
}

#[test]
fn protected_chapter_uses_structural_scraper() {
    let html = r#"<html><body>
        <div id="chapter-protector-data" data-signature="irrelevant"></div>
        <div class="reading-content">
            <div class="page-break"><img data-src="https://site.com/wp-content/uploads/2024/05/chapter-page-001.jpg"></div>
            <div class="page-break"><img src="https://site.com/theme/loading.gif"></div>
            <div class="page-break"><img src="https://site.com/wp-content/uploads/2024/05/chapter-page-002.jpg"></div>
        </div>
    </body></html>"#;

    let chapter = resolve_ok(html);
    assert_eq!(chapter.pages.len(), 2);
    assert!(chapter
        .warnings
        .iter()
        .any(|w| w.contains("chapter protector")));
}

#[test]
fn empty_document_produces_empty_result_without_error() {
    let chapter = resolve_ok("<html><body></body></html>");
    assert!(chapter.pages.is_empty());
    // The structural fallback ran and found nothing; that is reported as a
    // warning, never as an error.
    assert!(!chapter.warnings.is_empty());
}

#[test]
fn invalid_chapter_url_is_the_only_hard_error() {
    let result = resolve("<html><body></body></html>", "not a url");
    assert!(result.is_err());
}
