//! Endpoint paths of the store API, relative to the configured base URL.

pub const PRODUCTS: &str = "/productos";
pub const SERVER_CART: &str = "/compras/carrito";
pub const CONFIRM_PURCHASE: &str = "/compras/confirmar";
pub const LOGIN: &str = "/usuarios/login";
pub const REGISTER: &str = "/usuarios/registrar";
pub const VERIFY_SESSION: &str = "/usuarios/verificar-sesion";
pub const LOGOUT: &str = "/usuarios/logout";
pub const SALES: &str = "/sales";
pub const USERS: &str = "/users";
pub const EMPLOYEES: &str = "/employees";

pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

pub fn item(base_url: &str, collection: &str, id: &str) -> String {
    format!("{}/{}", endpoint(base_url, collection), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_not_doubled() {
        assert_eq!(endpoint("http://localhost:4000/", PRODUCTS), "http://localhost:4000/productos");
        assert_eq!(item("http://api", PRODUCTS, "P1"), "http://api/productos/P1");
    }
}
