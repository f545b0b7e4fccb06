use time::OffsetDateTime;
use time::macros::format_description;

use crate::middleware::auth::Session;

pub fn document<S: Into<Option<Session>>>(
    markup: maud::Markup,
    title: &str,
    session: S,
) -> maud::Markup {
    let session = session.into();

    maud::html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link rel="stylesheet" href="/assets/reset.css";
                link rel="stylesheet" href="/assets/index.css";
                title { (title) " - quill" }
            }

            body {
                div .container .m-auto {
                    (header(&session))
                    main { (markup) }
                    footer .mt-8 .text-sm .text-gray-500 {
                        "quill " (env!("GIT_HASH"))
                    }
                }
            }
        }
    }
}

fn header(session: &Option<Session>) -> maud::Markup {
    maud::html! {
        nav .mb-4 .flex .justify-between {
            span {
                a .hover:underline href="/" { "quill" }
            }
            @if let Some(session) = session {
                ul .flex .grow .ms-12 .gap-8 {
                    li { a .hover:underline href="/dashboard" { "dashboard" } }
                    li { a .hover:underline href="/friends" { "friends" } }
                }

                div {
                    span {
                        "Logged in as " (session.username)
                        " - "
                        a .underline href="/logout" { "Log out" }
                    }
                }
            } @else {
                div {
                    span {
                        a .underline href="/login" { "Log in" }
                        " - "
                        a .underline href="/register" { "Register" }
                    }
                }
            }
        }
    }
}

pub fn format_date(ts: OffsetDateTime) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    ts.format(&format).unwrap_or_default()
}
