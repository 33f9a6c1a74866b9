//! Page rendering.
//!
//! Handlers decide what goes on a page; a [`Renderer`] only turns a page name
//! and its data bag into HTML.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
  #[error("page data is not serialisable: {0}")]
  Data(#[from] serde_json::Error),
}

/// Every page the server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
  Main,
  StudentLogin,
  AlumniLogin,
  AdminLogin,
  Home,
  AdminHome,
  Profile,
  AddStudent,
  AddAlumni,
  StudentsList,
  AlumniList,
  Import,
  Error,
}

impl Page {
  pub fn name(self) -> &'static str {
    match self {
      Self::Main => "mainpage",
      Self::StudentLogin => "student_login",
      Self::AlumniLogin => "alumni_login",
      Self::AdminLogin => "admin_login",
      Self::Home => "home",
      Self::AdminHome => "admin_home",
      Self::Profile => "profile",
      Self::AddStudent => "add_student",
      Self::AddAlumni => "add_alumni",
      Self::StudentsList => "students_list",
      Self::AlumniList => "alumni_list",
      Self::Import => "import",
      Self::Error => "error",
    }
  }

  pub fn title(self) -> &'static str {
    match self {
      Self::Main => "Welcome",
      Self::StudentLogin => "Student Login",
      Self::AlumniLogin => "Alumni Login",
      Self::AdminLogin => "Admin Login",
      Self::Home => "Home",
      Self::AdminHome => "Admin Dashboard",
      Self::Profile => "Profile",
      Self::AddStudent => "Add Student",
      Self::AddAlumni => "Add Alumni",
      Self::StudentsList => "Students",
      Self::AlumniList => "Alumni",
      Self::Import => "Import Students to Alumni",
      Self::Error => "Error",
    }
  }
}

pub trait Renderer: Send + Sync {
  fn render(&self, page: Page, data: &Value) -> Result<String, RenderError>;
}

/// Minimal HTML shell: a heading, any `error`/`success` message in the data
/// bag, and the whole bag as an inline JSON document for client-side
/// templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
  fn render(&self, page: Page, data: &Value) -> Result<String, RenderError> {
    let title = escape_html(page.title());
    let mut html = format!(
      "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
       <title>{title} | LegacyLink</title>\n</head>\n<body data-page=\"{}\">\n\
       <h1>{title}</h1>\n",
      page.name()
    );

    for class in ["error", "success"] {
      if let Some(msg) = data.get(class).and_then(Value::as_str) {
        html.push_str(&format!(
          "<p class=\"{class}\">{}</p>\n",
          escape_html(msg)
        ));
      }
    }

    let json = serde_json::to_string(data)?;
    html.push_str(&format!(
      "<script type=\"application/json\" id=\"page-data\">{}</script>\n",
      escape_script_json(&json)
    ));
    html.push_str("</body>\n</html>\n");
    Ok(html)
  }
}

fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}

/// JSON stays valid; `</script>` and friends cannot close the element.
fn escape_script_json(json: &str) -> String {
  json
    .replace('&', "\\u0026")
    .replace('<', "\\u003c")
    .replace('>', "\\u003e")
}
