pub struct HeroParams {
    #[apivalidator("default=warrior,required,default=rogue")]
    pub class: String,
    #[apivalidator("default=1,min=1,default=5")]
    pub level: i64,
}

pub struct Guild;

impl Guild {
    /// apigen:api {"url": "/hero", "auth": true, "method": "POST"}
    pub fn hero(&self, ctx: &http::Extensions, params: HeroParams) -> Result<String, ApiError> {
        todo!()
    }
}
