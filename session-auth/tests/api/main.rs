mod email;
mod helpers;
mod login;
mod logout;
mod refresh;
mod signup;
