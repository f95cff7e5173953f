// Compiled-in seed values. Reads on a never-written key return these so the
// public site has content on first run instead of an empty state.
use serde_json::{json, Value};

pub fn profile() -> Value {
    json!({
        "name": "Your Name",
        "title": "Software Engineer",
        "bio": "Welcome to my portfolio. Edit this profile from the admin panel.",
        "location": "",
        "email": "",
        "avatar_url": "",
        "github_url": "",
        "linkedin_url": "",
        "website_url": ""
    })
}

pub fn skills() -> Value {
    json!([
        { "id": "seed-skill-1", "name": "Rust", "level": 80, "category": "Backend" },
        { "id": "seed-skill-2", "name": "TypeScript", "level": 70, "category": "Frontend" }
    ])
}

pub fn experience() -> Value {
    json!([
        {
            "id": "seed-exp-1",
            "company": "Acme Corp",
            "role": "Senior Engineer",
            "start": "2020",
            "end": "Present",
            "summary": "Sample experience entry. Replace it from the admin panel.",
            "highlights": ["Shipped things", "Fixed things"]
        }
    ])
}

pub fn partners() -> Value {
    json!([])
}

pub fn products() -> Value {
    json!([])
}

pub fn achievements() -> Value {
    json!([])
}

pub fn settings() -> Value {
    json!({
        "site_title": "Portfolio",
        "tagline": "",
        "theme": "system",
        "show_partners": true,
        "show_products": true,
        "analytics_id": ""
    })
}

pub fn contact() -> Value {
    json!({
        "email": "hello@example.com",
        "phone": "",
        "address": ""
    })
}

pub fn messages() -> Value {
    json!([])
}
