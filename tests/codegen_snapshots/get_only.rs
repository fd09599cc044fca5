pub struct ListParams {
    #[apivalidator("enum=asc|desc,default=asc")]
    pub order: String,
    #[apivalidator("paramname=per_page,min=1,max=100")]
    pub limit: i64,
}

pub struct Catalog;

impl Catalog {
    /// apigen:api {"url": "/items", "method": "GET"}
    pub fn list(&self, ctx: &http::Extensions, params: ListParams) -> Result<Vec<String>, ApiError> {
        todo!()
    }
}
