use actix_web::{HttpResponse, Responder, web};
use rust_embed::RustEmbed;
use tracing::debug;

/// Screen pages compiled into the binary.
#[derive(RustEmbed)]
#[folder = "web/"]
struct WebAssets;

pub struct PageService;

impl PageService {
    fn serve(name: &str) -> HttpResponse {
        debug!("Serving page: {}", name);
        match WebAssets::get(name) {
            Some(content) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(content.data.into_owned()),
            None => HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body("Not Found"),
        }
    }

    /// `/` - code issuer screen
    pub async fn issuer() -> impl Responder {
        Self::serve("index.html")
    }

    /// `/register/{code}` - intake screen; the page script reads the code
    /// from the path and drives validation and submission.
    pub async fn register(_code: web::Path<String>) -> impl Responder {
        Self::serve("register.html")
    }

    /// `/admin` - registry viewer screen
    pub async fn admin() -> impl Responder {
        Self::serve("admin.html")
    }
}
