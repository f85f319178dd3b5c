#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use forum_scrape::{dom, extract_navigation_directory, extract_topic_list};

/// GBK page declaring its charset; the section title is 节点 (BD DA B5 E3).
const GBK_DIRECTORY: &[u8] = b"<html><head><meta charset=\"gbk\"></head><body>\
    <div id=\"Main\"><div class=\"box\"></div><div class=\"box\">\
    <div class=\"cell\">heading</div>\
    <div class=\"cell\"><table><tr><td>\xBD\xDA\xB5\xE3</td><td><a href=\"/go/qna\">qna</a></td></tr></table></div>\
    </div></div></body></html>";

#[test]
fn declared_charset_is_decoded() {
    let doc = dom::parse_bytes(GBK_DIRECTORY);
    let sections = extract_navigation_directory(&doc).expect("directory extraction failed");

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "节点");
    assert_eq!(sections[0].node_names, vec!["qna"]);
}

#[test]
fn utf8_bytes_without_declaration() {
    let html = r##"<html><body><div id="Main"><div class="box">
        <div class="cell item"><table><tr>
            <td><a href="/member/alice"><img src="/a.png" class="avatar" alt="alice"></a></td>
            <td><span class="item_title"><a href="/t/7#reply1">中文标题</a></span>
            <span class="topic_info"><strong><a href="/member/alice">alice</a></strong> <span>刚刚</span></span></td>
        </tr></table></div>
    </div></div></body></html>"##;

    let doc = dom::parse_bytes(html.as_bytes());
    let topics = extract_topic_list(&doc).expect("listing failed");
    assert_eq!(topics[0].title, "中文标题");
}

#[test]
fn invalid_utf8_is_replaced_not_rejected() {
    let doc = dom::parse_bytes(b"<html><body><div id=\"Main\">\xFF\xFE</div></body></html>");
    let topics = extract_topic_list(&doc).expect("listing failed");
    assert!(topics.is_empty());
}
