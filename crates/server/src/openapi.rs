use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct MensagemDoc { pub mensagem: String }

#[derive(Serialize, ToSchema)]
pub struct ClientDoc {
    pub cliente_id: u64,
    pub nome: String,
    #[serde(rename = "endereço")]
    pub endereco: String,
    pub cep: String,
    pub data_de_nascimento: String,
    pub telefone: String,
}

#[derive(Serialize, ToSchema)]
pub struct ClientInputDoc {
    pub nome: String,
    #[serde(rename = "endereço")]
    pub endereco: String,
    pub cep: String,
    pub data_de_nascimento: String,
    pub telefone: String,
}

#[derive(Serialize, ToSchema)]
pub struct ClientPatchDoc {
    pub cliente_id: Option<u64>,
    pub nome: Option<String>,
    #[serde(rename = "endereço")]
    pub endereco: Option<String>,
    pub cep: Option<String>,
    pub data_de_nascimento: Option<String>,
    pub telefone: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ClienteRespostaDoc {
    pub mensagem: String,
    pub cliente: ClientDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::clients::list_clients,
        crate::routes::clients::get_client,
        crate::routes::clients::create_client,
        crate::routes::clients::update_client,
        crate::routes::clients::delete_client,
    ),
    components(
        schemas(
            HealthResponse,
            MensagemDoc,
            ClientDoc,
            ClientInputDoc,
            ClientPatchDoc,
            ClienteRespostaDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "clientes")
    )
)]
pub struct ApiDoc;
