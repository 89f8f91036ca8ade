//! Mock clinic records API.
//!
//! Every route answers with canned data: nothing is stored, credentials are
//! never checked and the issued tokens carry no signature. Routes are tried
//! in registration order, so `/records` must come before `/records/<id>` and
//! the catch-all DELETE/PUT handlers come last.

pub mod fixtures;
pub mod token;

use crate::http::Response;
use crate::http::handler::HandlerFunc;
use crate::http::method::Method;
use crate::http::request::RequestContext;
use crate::http::router::Router;
use crate::http::status::Status;
use serde_json::{Value, json};
use token::Claims;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }
}

pub fn register(router: &mut Router) -> anyhow::Result<()> {
    router.add_handler(Method::POST, "/login", login_as(Role::Student))?;
    router.add_handler(Method::POST, "/admin-login", login_as(Role::Admin))?;
    router.add_handler(Method::POST, "/signup", Box::new(signup))?;
    router.add_handler(Method::POST, "/forgot-password", Box::new(reset_password))?;
    router.add_handler(Method::POST, "/reset-password", Box::new(reset_password))?;
    router.add_handler(Method::POST, "/records", Box::new(create_record))?;

    router.add_handler(Method::GET, "/records", Box::new(list_records))?;
    router.add_handler(Method::GET, "/my-records", Box::new(list_records))?;
    router.add_handler(Method::GET, r"/records/<id:\d+>", Box::new(get_record))?;
    router.add_handler(Method::GET, "/users", Box::new(list_users))?;

    router.add_handler(Method::DELETE, "<path:.*>", Box::new(mutate))?;
    router.add_handler(Method::PUT, "<path:.*>", Box::new(mutate))?;
    Ok(())
}

/// Router with the full mock API registered.
pub fn router() -> anyhow::Result<Router> {
    let mut router = Router::new();
    register(&mut router)?;
    Ok(router)
}

fn login_as(role: Role) -> HandlerFunc {
    Box::new(move |ctx| login(ctx, role))
}

fn login(ctx: &RequestContext, role: Role) -> anyhow::Result<Response> {
    let token = token::issue(&Claims {
        username: token::or_default(ctx.require_field("username")?, "User"),
        is_admin: role == Role::Admin,
    })?;

    Ok(Response::json(
        Status::OK,
        json!({
            "success": true,
            "message": format!("{} login successful", role.as_str()),
            "token": token,
            "role": role.as_str(),
        }),
    ))
}

fn signup(ctx: &RequestContext) -> anyhow::Result<Response> {
    // Only a literal `true` grants admin; "true" or 1 do not.
    let is_admin = matches!(ctx.require_field("is_admin")?, Some(Value::Bool(true)));
    let token = token::issue(&Claims {
        username: token::or_default(ctx.require_field("name")?, "New User"),
        is_admin,
    })?;

    Ok(Response::json(
        Status::OK,
        json!({
            "success": true,
            "message": "Account created successfully",
            "token": token,
        }),
    ))
}

fn reset_password(_ctx: &RequestContext) -> anyhow::Result<Response> {
    Ok(Response::json(
        Status::OK,
        json!({ "success": true, "reset_token": "123456" }),
    ))
}

fn create_record(_ctx: &RequestContext) -> anyhow::Result<Response> {
    Ok(Response::json(
        Status::CREATED,
        json!({ "success": true, "message": "Record saved" }),
    ))
}

fn list_records(_ctx: &RequestContext) -> anyhow::Result<Response> {
    Ok(Response::json_from(Status::OK, &fixtures::records())?)
}

fn get_record(_ctx: &RequestContext) -> anyhow::Result<Response> {
    Ok(Response::json_from(Status::OK, &fixtures::sample_record())?)
}

fn list_users(_ctx: &RequestContext) -> anyhow::Result<Response> {
    Ok(Response::json_from(Status::OK, &fixtures::users())?)
}

fn mutate(_ctx: &RequestContext) -> anyhow::Result<Response> {
    Ok(Response::json(
        Status::OK,
        json!({ "success": true, "message": "Operation successful (mock)" }),
    ))
}
