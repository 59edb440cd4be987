//! Legacy body samples shared by the integration tests

/// Plain message text, no markup
#[allow(dead_code)]
pub const PLAIN_MESSAGE: &str = "Hey SW,
I was the target of a hack attack so have been awol while I dealt with that.

I am really very happy for you.

xxxxxxxxx";

/// Paragraphs joined by newlines, one doubled-quote absolute link
#[allow(dead_code)]
pub const GUIDE_REPLY: &str = r#"<p>Hello thewife,</p>
<p>Please post in a <a href=""https://www.bigwhitewall.com/talkabouts/post/"">community talkabout</a>, so more help can come to you.</p>
<p>Best wishes,<br />WG</p>"#;

/// Space-separated paragraphs, `&nbsp;` fillers, relative thread links
#[allow(dead_code)]
pub const SHIFT_NOTES: &str = r#" <p>Hi Fleur and Mo</p> <p>&nbsp;</p> <p><strong>Risk: </strong></p> <p><a href=""../159836/""><strong>Escalation GTA</strong></a></p> <p><a href=""../432148/"">WalksT2s</a> I completed a course</p> "#;

/// Word-processor paste: doubled-quote style attributes on every element
#[allow(dead_code)]
pub const STYLED_PASTE: &str = r#"<p style=""line-height: 1.38; margin-top: 0pt;""><span style=""font-size: 12pt; font-family: Arial;"">Dear Anonymous, </span></p>
<p style=""line-height: 1.38;"">&nbsp;</p>
<p style=""line-height: 1.38;""><span style=""font-size: 12pt;"">Warm wishes,</span></p>
<p>&nbsp;</p>"#;

/// Moderation note quoting text with doubled quotes outside any tag
#[allow(dead_code)]
pub const MODERATION_NOTE: &str = r#"Removed ""other than to grab the wheel"" and ""it feels""
from post: https://www.bigwhitewall.com/talkabouts/thread/253296/"#;

/// Forwarded email with entity-encoded paragraph tags inside the text
#[allow(dead_code)]
pub const FORWARDED_EMAIL: &str = r#"<blockquote><span style=""background-color: rgba(255, 255, 255, 0);"">Hello John,&amp;nbsp;&lt;/p&gt;<br /></span></blockquote>
<blockquote><span style=""background-color: rgba(255, 255, 255, 0);"">&lt;p&gt;Kind regards&lt;/p&gt;<br /></span></blockquote>"#;

/// Welcome letter with headings and single-quoted hrefs
#[allow(dead_code)]
pub const WELCOME_LETTER: &str = "<p>Hello anon878974</p>
<h2>Talk to me</h2>
<p>Is there anything you would like to share? <a href='#ctl00_MainColumn_ReplyButton2'>Post a reply</a> below.</p>
<p>You can <a href='/self-assessment/'>Take a Test</a> to see how you score.</p>";
