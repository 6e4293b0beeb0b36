//! Server-rendered consultation markup.
//!
//! Every user-supplied and model-supplied string goes through `html-escape`
//! before it is embedded; the allowlist is empty, so no tag survives from
//! either direction.

use chrono::Utc;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::persona::DoctorId;
use crate::session::{Role, Session};

const PAGE_STYLE: &str = r#"
body {
  font-family: 'Arial', sans-serif;
  background: linear-gradient(45deg, #4a90d9, #7fc3a7);
  margin: 0;
  padding: 20px;
  color: #222;
}
h1 {
  text-align: center;
  font-size: 30px;
  color: #fff;
  font-weight: bold;
  text-shadow: 2px 2px 4px rgba(0, 0, 0, 0.5);
  margin-bottom: 10px;
}
.doctor-card {
  max-width: 760px;
  margin: 0 auto 16px auto;
  background-color: rgba(255, 255, 255, 0.9);
  border-radius: 10px;
  padding: 14px 20px;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2);
}
.doctor-card .avatar { font-size: 28px; margin-right: 10px; }
.doctor-card .meta { color: #555; font-size: 14px; }
.scroll-container {
  max-width: 760px;
  max-height: 500px;
  margin: 0 auto;
  overflow-y: auto;
  background-color: rgba(255, 255, 255, 0.85);
  padding: 20px;
  border-radius: 10px;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2);
}
.banner {
  padding: 10px;
  margin-bottom: 12px;
  border-radius: 8px;
  background-color: #eaf6ee;
  border: 1px solid #7fc3a7;
}
.greeting h2 { margin-top: 0; }
.msg { padding: 10px 12px; margin-bottom: 10px; border-radius: 8px; }
.msg .sender { font-weight: bold; margin-right: 8px; }
.msg .time { color: #888; font-size: 12px; }
.msg p { margin: 6px 0 0 0; line-height: 1.5; white-space: pre-wrap; }
.msg.patient { background-color: #eef3fb; border-left: 3px solid #4a90d9; }
.msg.doctor { background-color: #eef9f2; border-left: 3px solid #2e8b57; }
.msg.system { background-color: #f6f6f6; color: #666; font-style: italic; }
.search-container { max-width: 760px; margin: 24px auto 0 auto; text-align: center; }
.search-container input[type="text"] {
  width: 70%;
  padding: 12px;
  font-size: 16px;
  border-radius: 30px;
  border: 2px solid #4a90d9;
  background-color: #fff;
}
.search-container button {
  padding: 12px 24px;
  font-size: 16px;
  color: #fff;
  background-color: #4a90d9;
  border: none;
  border-radius: 30px;
  cursor: pointer;
  margin-left: 10px;
}
.search-container button:hover { background-color: #3a77b4; }
.hints { max-width: 760px; margin: 12px auto; color: #f4f8ff; font-size: 13px; text-align: center; }
"#;

const ERROR_STYLE: &str = r#"
body {
  font-family: 'Arial', sans-serif;
  background: linear-gradient(45deg, #4a90d9, #7fc3a7);
  margin: 0;
  padding: 40px 20px;
}
.error-card {
  max-width: 560px;
  margin: 0 auto;
  background-color: rgba(255, 255, 255, 0.95);
  border-radius: 10px;
  padding: 24px;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2);
}
.error-card h1 { margin-top: 0; color: #b03030; }
.error-code { color: #888; font-size: 13px; }
"#;

/// The consultation page: doctor header, history, input form.
pub fn consultation_page(session: &Session, csrf_token: &str, banner: Option<&str>) -> String {
    let profile = session.active_doctor.profile();
    let minutes = (Utc::now() - session.consultation_start).num_minutes().max(0);

    let mut blocks = String::new();

    if let Some(text) = banner {
        blocks.push_str(&format!(
            r#"<div class="banner">{}</div>"#,
            encode_text(text)
        ));
    }

    if session.history.is_empty() {
        blocks.push_str(&format!(
            r#"<div class="greeting"><h2>Welcome to your virtual consultation</h2><p>{greeting}</p><p class="meta">{bio}</p></div>"#,
            greeting = encode_text(profile.greeting),
            bio = encode_text(profile.bio),
        ));
    }

    for message in &session.history {
        let class = match message.role {
            Role::Patient => "msg patient",
            Role::Doctor => "msg doctor",
            Role::System => "msg system",
        };
        blocks.push_str(&format!(
            r#"<div class="{class}"><span class="sender">{sender}</span><span class="time">{time}</span><p>{body}</p></div>"#,
            class = class,
            sender = encode_text(&message.sender),
            time = message.timestamp.format("%H:%M"),
            body = encode_text(&message.body),
        ));
    }

    let specialists = DoctorId::ALL
        .iter()
        .map(|doctor| doctor.key())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Virtual Consultation</title>
<style>{style}</style>
</head>
<body>
<h1>Virtual Consultation</h1>
<div class="doctor-card">
  <span class="avatar">{avatar}</span>
  <strong>{name}</strong> &mdash; {title}
  <div class="meta">{specialty} &middot; {years} years of experience &middot; consultation time: {minutes} min</div>
</div>
<div class="scroll-container">{blocks}</div>
<div class="search-container">
  <form action="/" method="get">
    <input type="text" name="query" maxlength="500" placeholder="Describe your symptoms..." autofocus>
    <input type="hidden" name="token" value="{token}">
    <button type="submit">Send</button>
  </form>
</div>
<p class="hints">Commands: "see &lt;specialty&gt;" to switch doctors ({specialists}), "clear chat" to start over.</p>
</body>
</html>"#,
        style = PAGE_STYLE,
        avatar = profile.avatar,
        name = encode_text(profile.name),
        title = encode_text(profile.title),
        specialty = encode_text(profile.specialty),
        years = profile.years_experience,
        minutes = minutes,
        blocks = blocks,
        token = encode_double_quoted_attribute(csrf_token),
        specialists = specialists,
    )
}

/// Generic error page; `code` is the machine-readable reason.
pub fn error_page(title: &str, detail: &str, code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<div class="error-card">
  <h1>{title}</h1>
  <p>{detail}</p>
  <p class="error-code">code: {code}</p>
  <a href="/">Back to your consultation</a>
</div>
</body>
</html>"#,
        title = encode_text(title),
        detail = encode_text(detail),
        code = encode_text(code),
        style = ERROR_STYLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Message;

    fn empty_session() -> Session {
        Session {
            id: "s1".to_string(),
            active_doctor: DoctorId::General,
            history: Vec::new(),
            consultation_start: Utc::now(),
        }
    }

    #[test]
    fn empty_history_renders_the_greeting() {
        let page = consultation_page(&empty_session(), "token", None);
        assert!(page.contains("Welcome to your virtual consultation"));
        assert!(page.contains("Dr. Maya Chen"));
    }

    #[test]
    fn history_renders_in_order_with_role_classes() {
        let mut session = empty_session();
        session.history.push(Message::patient("first"));
        session
            .history
            .push(Message::doctor(DoctorId::General, "second"));

        let page = consultation_page(&session, "token", None);
        let patient_at = page.find("msg patient").unwrap();
        let doctor_at = page.find("msg doctor").unwrap();
        assert!(patient_at < doctor_at);
        assert!(page.find("first").unwrap() < page.find("second").unwrap());
    }

    #[test]
    fn hostile_strings_are_escaped() {
        let mut session = empty_session();
        session.history.push(Message::patient("<script>alert('x')</script>"));
        session.history.push(Message::doctor(
            DoctorId::General,
            "<img src=x onerror=alert(1)>",
        ));

        let page = consultation_page(&session, "token", None);
        assert!(!page.contains("<script>alert"));
        assert!(!page.contains("<img src=x"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn csrf_token_lands_in_the_hidden_field() {
        let page = consultation_page(&empty_session(), "abc123", None);
        assert!(page.contains(r#"name="token" value="abc123""#));
    }

    #[test]
    fn banner_is_shown_when_present() {
        let page = consultation_page(
            &empty_session(),
            "token",
            Some("The consultation has been cleared."),
        );
        assert!(page.contains("has been cleared"));
    }

    #[test]
    fn error_page_carries_the_code() {
        let page = error_page("Message too long", "Too long.", "query_too_long");
        assert!(page.contains("query_too_long"));
        assert!(page.contains("Message too long"));
    }
}
