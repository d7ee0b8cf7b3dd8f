pub struct LoginDto {
    pub email: String,
    pub password: String,
}
