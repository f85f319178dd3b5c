#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use forum_scrape::{dom, extract_topic_detail, is_logged_in, ClientHint, Error, PageKind};

const TOPIC_PAGE: &str = r##"<html><head><title>Borrow checker question - V2EX</title></head><body>
<div id="Top"><div class="content"><div class="site-nav"><div class="tools">
  <a href="/" class="top">首页</a>
  <a href="/member/viewer" class="top">viewer</a>
  <a href="#;" onclick="if (confirm('确定要从 V2EX 登出？')) { location.href= '/signout?once=90210'; }" class="top">登出</a>
</div></div></div></div>
<div id="Wrapper"><div class="content"><div id="Main">
  <div class="box" style="border-bottom: 0px;">
    <div class="header"><div class="fr"><a href="/member/alice"><img src="https://cdn.example/avatar/alice_large.png" class="avatar" border="0" align="default" alt="alice"></a></div>
      <a href="/">V2EX</a> <span class="chevron">&nbsp;›&nbsp;</span> <a href="/go/rust">Rust</a>
      <div class="sep10"></div>
      <div class="votes"><a href="javascript:" onclick="upVoteTopic(1001);" class="vote"><i class="fa fa-chevron-up"></i> 7</a> &nbsp;<a href="javascript:" onclick="downVoteTopic(1001);" class="vote"><i class="fa fa-chevron-down"></i></a></div>
      <h1>Borrow checker question</h1>
      <small class="gray"><a href="/member/alice">alice</a> · <span title="2024-05-01 10:00:00 +08:00">2 小时前</span> via iPhone · 1234 次点击</small>
    </div>
    <div class="cell"><div class="topic_content"><div class="markdown_body"><p>How do I use <code>split_at_mut</code>?</p></div></div></div>
    <div class="subtle"><span class="fade">第 1 条附言 &nbsp;·&nbsp; <span title="2024-05-01 11:00:00 +08:00">1 小时前</span></span><div class="sep5"></div><div class="topic_content">Solved with indices.</div></div>
    <div class="subtle"><span class="fade">第 2 条附言 &nbsp;·&nbsp; <span title="2024-05-01 11:30:00 +08:00">30 分钟前</span></span><div class="sep5"></div><div class="topic_content">Thanks all.</div></div>
    <div class="topic_buttons"><div class="fr topic_stats" style="padding-top: 4px;">1234 次点击 &nbsp;∙&nbsp; 5 人收藏 &nbsp; ∙&nbsp; 2 人感谢 &nbsp; </div>
      <a href="/favorite/topic/1001?once=90210" class="tb">加入收藏</a>
      <a href="#;" onclick="shareTopic();" class="tb">Tweet</a>
      <a href="/ignore/topic/1001?once=90210" class="tb">忽略主题</a>
      <div id="topic_thank"><a href="#;" class="tb">感谢</a></div>
    </div>
  </div>
  <div class="sep20"></div>
  <div class="box">
    <div class="cell"><div class="fr" style="margin: -3px -5px 0px 0px;"><a href="/tag/rust" class="tag">rust</a></div><span class="gray">3 条回复 &nbsp;<strong class="snow">•</strong> &nbsp;2024-05-01 12:00:00 +08:00</span></div>
    <div id="r_5001" class="cell">
      <table cellpadding="0" cellspacing="0" border="0" width="100%"><tr>
        <td width="48" valign="top" align="center"><img src="https://cdn.example/avatar/bob.png" class="avatar" border="0" align="default" alt="bob"></td>
        <td width="10" valign="top"></td>
        <td width="auto" valign="top" align="left"><div class="fr"><div class="thank_area thanked">感谢已发送</div> &nbsp; &nbsp; <span class="no">1</span></div>
          <div class="sep3"></div>
          <strong><a href="/member/bob" class="dark">bob</a></strong>&nbsp; &nbsp;<span class="ago" title="2024-05-01 10:30:00 +08:00">1 小时前 via iPhone</span> &nbsp; <span class="small fade"><img src="/static/img/heart_neue_red.png" width="14" align="absmiddle" alt="❤️"> 4</span>
          <div class="sep5"></div>
          <div class="reply_content">Use <code>split_at_mut</code>.</div>
        </td>
      </tr></table>
    </div>
    <div id="r_5002" class="cell">
      <table cellpadding="0" cellspacing="0" border="0" width="100%"><tr>
        <td width="48" valign="top" align="center"><img src="https://cdn.example/avatar/alice.png" class="avatar" border="0" align="default" alt="alice"></td>
        <td width="10" valign="top"></td>
        <td width="auto" valign="top" align="left"><div class="fr"><span class="no">2</span></div>
          <div class="sep3"></div>
          <strong><a href="/member/alice" class="dark">alice</a></strong> <div class="badges"><div class="badge op">OP</div></div>&nbsp; &nbsp;<span class="ago" title="2024-05-01 10:45:00 +08:00">1 小时前 via Android</span>
          <div class="sep5"></div>
          <div class="reply_content">@<a href="/member/bob">bob</a> thanks!</div>
        </td>
      </tr></table>
    </div>
    <div id="r_removed" class="cell"><span class="fade">该回复已被删除</span></div>
    <div id="r_5003" class="cell">
      <table cellpadding="0" cellspacing="0" border="0" width="100%"><tr>
        <td width="48" valign="top" align="center"><img src="https://cdn.example/avatar/mod.png" class="avatar" border="0" align="default" alt="moderator"></td>
        <td width="10" valign="top"></td>
        <td width="auto" valign="top" align="left"><div class="fr"><span class="no">3</span></div>
          <div class="sep3"></div>
          <strong><a href="/member/moderator" class="dark">moderator</a></strong> <div class="badges"><div class="badge mod">MOD</div></div>&nbsp; &nbsp;<span class="ago" title="2024-05-01 11:50:00 +08:00">10 分钟前</span>
          <div class="sep5"></div>
          <div class="reply_content">Moved to the right node.</div>
        </td>
      </tr></table>
    </div>
  </div>
</div></div></div>
</body></html>"##;

fn extract() -> forum_scrape::Topic {
    let doc = dom::parse(TOPIC_PAGE);
    extract_topic_detail(&doc, 1001).expect("topic extraction failed")
}

#[test]
fn header_fields() {
    let topic = extract();

    assert_eq!(topic.id, 1001);
    assert_eq!(topic.title, "Borrow checker question");
    assert_eq!(topic.votes, 7);
    assert_eq!(topic.reply_count, 3);
    assert_eq!(topic.created.as_deref(), Some("2024-05-01 10:00:00"));
    assert_eq!(topic.via, Some(ClientHint::IPhone));

    let node = topic.node.as_ref().expect("node");
    assert_eq!(node.name, "rust");
    assert_eq!(node.title, "Rust");

    let member = topic.member.as_ref().expect("member");
    assert_eq!(member.username, "alice");
    assert_eq!(
        member.avatar.as_deref(),
        Some("https://cdn.example/avatar/alice_large.png")
    );
}

#[test]
fn content_keeps_markup() {
    let topic = extract();
    let content = topic.content.expect("content");
    assert!(content.contains("<code>split_at_mut</code>"));
    assert!(content.contains("markdown_body"));
}

#[test]
fn stats_line_counters() {
    let topic = extract();
    assert_eq!(topic.views, 1234);
    assert_eq!(topic.likes, 5);
    assert_eq!(topic.thanks, 2);
}

#[test]
fn action_buttons_state_and_token() {
    let topic = extract();
    assert_eq!(topic.liked, Some(false));
    assert_eq!(topic.ignored, Some(false));
    assert_eq!(topic.once.as_deref(), Some("90210"));
    assert!(!topic.thanked);
}

#[test]
fn supplements_in_document_order() {
    let topic = extract();
    assert_eq!(topic.supplements.len(), 2);
    assert_eq!(
        topic.supplements[0].created.as_deref(),
        Some("2024-05-01 11:00:00")
    );
    assert_eq!(
        topic.supplements[0].content.as_deref(),
        Some("Solved with indices.")
    );
    assert_eq!(
        topic.supplements[1].created.as_deref(),
        Some("2024-05-01 11:30:00")
    );
}

#[test]
fn replies_skip_rows_without_numeric_id() {
    let topic = extract();
    let ids: Vec<u64> = topic.replies.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![5001, 5002, 5003]);
}

#[test]
fn reply_fields() {
    let topic = extract();
    let first = &topic.replies[0];

    assert_eq!(first.member.as_ref().map(|m| m.username.as_str()), Some("bob"));
    assert_eq!(first.created.as_deref(), Some("2024-05-01 10:30:00"));
    assert_eq!(first.via, Some(ClientHint::IPhone));
    assert_eq!(first.thanks, 4);
    assert!(first.thanked);
    assert!(!first.op);
    assert!(!first.is_mod);
    assert!(!first.has_related_replies);
    assert!(first
        .content
        .as_deref()
        .is_some_and(|c| c.contains("split_at_mut")));
}

#[test]
fn reply_badges_and_mentions() {
    let topic = extract();
    let op_reply = &topic.replies[1];
    assert!(op_reply.op);
    assert!(op_reply.has_related_replies);
    assert_eq!(op_reply.via, Some(ClientHint::Android));
    assert_eq!(op_reply.thanks, 0);
    assert!(!op_reply.thanked);

    let mod_reply = &topic.replies[2];
    assert!(mod_reply.is_mod);
    assert!(!mod_reply.op);
    assert_eq!(mod_reply.via, None);
}

#[test]
fn signed_in_toolbar_is_detected() {
    let doc = dom::parse(TOPIC_PAGE);
    assert!(is_logged_in(&doc));
}

#[test]
fn signed_out_topic_has_no_button_state() {
    let html = TOPIC_PAGE.replace(
        r#"<a href="/favorite/topic/1001?once=90210" class="tb">加入收藏</a>"#,
        "",
    );
    let html = html.replace(r##"<a href="#;" onclick="shareTopic();" class="tb">Tweet</a>"##, "");
    let html = html.replace(r#"<a href="/ignore/topic/1001?once=90210" class="tb">忽略主题</a>"#, "");
    let html = html.replace(r##"<div id="topic_thank"><a href="#;" class="tb">感谢</a></div>"##, "");
    let doc = dom::parse(&html);
    let topic = extract_topic_detail(&doc, 1001).expect("topic extraction failed");

    assert_eq!(topic.liked, None);
    assert_eq!(topic.ignored, None);
    assert_eq!(topic.once, None);
    assert_eq!(topic.views, 1234);
}

#[test]
fn favorited_and_ignored_topic() {
    let html = TOPIC_PAGE
        .replace("/favorite/topic/1001", "/unfavorite/topic/1001")
        .replace("/ignore/topic/1001", "/unignore/topic/1001")
        .replace(
            r##"<div id="topic_thank"><a href="#;" class="tb">感谢</a></div>"##,
            r#"<div id="topic_thank"><span class="topic_thanked">感谢已发送</span></div>"#,
        );
    let doc = dom::parse(&html);
    let topic = extract_topic_detail(&doc, 1001).expect("topic extraction failed");

    assert_eq!(topic.liked, Some(true));
    assert_eq!(topic.ignored, Some(true));
    assert!(topic.thanked);
}

#[test]
fn missing_main_is_an_error() {
    let doc = dom::parse("<html><body><p>502 Bad Gateway</p></body></html>");
    assert!(matches!(
        extract_topic_detail(&doc, 1),
        Err(Error::MissingRoot {
            page: PageKind::TopicDetail,
            ..
        })
    ));
}
