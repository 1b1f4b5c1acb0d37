//! Embedded list of frequently breached passwords (lowercase).

const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "123456789",
    "12345678",
    "1234567890",
    "12345",
    "1234567",
    "111111",
    "000000",
    "123123",
    "654321",
    "666666",
    "121212",
    "112233",
    "987654321",
    "password",
    "password1",
    "password12",
    "password123",
    "password1!",
    "p@ssw0rd",
    "p@ssword",
    "passw0rd",
    "pa$$word",
    "qwerty",
    "qwerty123",
    "qwertyuiop",
    "qwerty1!",
    "1q2w3e4r",
    "1q2w3e4r5t",
    "1qaz2wsx",
    "zaq12wsx",
    "asdfghjkl",
    "asdf1234",
    "abc123",
    "abcd1234",
    "iloveyou",
    "iloveyou1",
    "admin",
    "admin123",
    "admin@123",
    "administrator",
    "root",
    "toor",
    "letmein",
    "letmein1",
    "welcome",
    "welcome1",
    "welcome123",
    "welcome@123",
    "monkey",
    "dragon",
    "master",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "superman",
    "batman",
    "trustno1",
    "shadow",
    "michael",
    "jennifer",
    "charlie",
    "hello123",
    "freedom",
    "whatever",
    "starwars",
    "changeme",
    "changeme1",
    "secret",
    "secret123",
    "login",
    "guest",
    "test1234",
    "summer2024",
    "winter2024",
    "spring2024",
    "autumn2024",
    "qwerty@123",
    "passpass",
    "00000000",
    "11111111",
    "88888888",
    "aa123456",
    "a1b2c3d4",
];

/// Case-insensitive membership check against the embedded list.
#[must_use]
pub fn is_common_password(password: &str) -> bool {
    let candidate = password.trim().to_lowercase();
    COMMON_PASSWORDS.iter().any(|common| *common == candidate)
}
